use urbanplan::codec::TOKEN_PREFIX;
use urbanplan::proposals::record::INDEX_KEY;

/// Display version information
pub fn execute() {
    println!("urbanplan {}", env!("CARGO_PKG_VERSION"));
    println!("Urban development proposals with obscured vote counts");
    println!("Index key: {}  Token prefix: {}", INDEX_KEY, TOKEN_PREFIX);
}
