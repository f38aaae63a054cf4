use serde_json::Value;

/// Pretty-print JSON to stdout. This is the default output format.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
