//! Uppercase tokens that look like tickers in headlines but are acronyms or
//! ordinary words. Applied to bare-uppercase matches only.

use std::collections::HashSet;
use std::sync::LazyLock;

const FALSE_POSITIVES: &[&str] = &[
    // titles, agencies, macro acronyms
    "CEO", "CFO", "COO", "CTO", "IPO", "SEC", "ETF", "FDA", "FED", "GDP", "CPI", "NYSE", "DOJ",
    "FBI", "IRS", "IMF", "ECB", "API", "USA", "USD", "EUR", "GBP", "JPY", "EPS", "YTD", "ATH",
    "ATL", "EOD", "AH", "SPAC", "REIT", "ESG", "PE", "VC",
    // three letters
    "THE", "AND", "FOR", "BUT", "NOT", "YOU", "HER", "HIS", "NEW", "TOP", "BIG", "OLD", "HOT",
    "KEY", "FEW", "OUR", "ANY", "MAY", "CAN", "HAS", "HAD", "ITS", "WAS", "ARE", "WHO", "HOW",
    "WHY", "SAY", "SET", "SAW", "RUN", "CUT", "PUT", "HIT", "LET", "GOT", "GET", "END", "TRY",
    "BUY", "OWN", "PAY", "WIN", "WON", "ADD", "AGO", "ACE", "AIM", "BET", "BIT", "CAP", "DAY",
    "DIP", "ERA", "EYE", "FIT", "GAP", "LOW", "MIX", "OPT", "PRO", "RAW", "ROW", "TAX", "WAR",
    "WAY",
    // four letters
    "HIGH", "ALSO", "JUST", "OVER", "INTO", "MORE", "MOST", "MUCH", "ONLY", "VERY", "WHEN",
    "EVEN", "BACK", "DOWN", "EACH", "EVER", "FROM", "FULL", "HALF", "HERE", "HOLD", "JUMP",
    "KEEP", "LAST", "LATE", "LEAD", "LIFT", "LIKE", "LINE", "LIST", "LONG", "LOOK", "LOSE",
    "LOST", "MADE", "MAKE", "MARK", "MISS", "MOVE", "MUST", "NEAR", "NEED", "NEXT", "OPEN",
    "PART", "PAST", "PEAK", "PLAN", "PLAY", "PLUS", "POLL", "PULL", "PUSH", "RATE", "REAL",
    "RIDE", "RISE", "RISK", "ROAD", "RULE", "RUSH", "SAID", "SALE", "SAME", "SELL", "SENT",
    "SHOW", "SHUT", "SIDE", "SIGN", "SLIP", "SLOW", "SNAP", "SOAR", "SOME", "STAY", "STEP",
    "STOP", "SURE", "TAKE", "TALK", "TELL", "THAN", "THAT", "THEM", "THEN", "THEY", "THIS",
    "TIME", "TOLL", "TOOK", "TURN", "UNIT", "UPON", "WARN", "WEEK", "WELL", "WENT", "WERE",
    "WHAT", "WILL", "WITH", "WORD", "WORK", "WRAP", "YEAR", "ZERO",
    // five letters
    "AFTER", "RALLY", "SURGE", "STOCK", "SHARE", "TRADE", "GAINS", "FALLS", "DROPS", "JUMPS",
    "WATCH", "ALERT", "BREAK", "CLOSE", "CRASH", "INDEX", "LOWER", "MIXED", "BRIEF", "CHART",
    "CLIMB", "DAILY", "EARLY", "FIRST", "FRESH", "GIVES", "GOING", "AHEAD", "MAJOR", "OFFER",
    "OTHER", "POINT", "PRICE", "READY",
];

static FALSE_POSITIVE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| FALSE_POSITIVES.iter().copied().collect());

pub fn is_false_positive(token: &str) -> bool {
    FALSE_POSITIVE_SET.contains(token)
}
