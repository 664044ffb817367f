const UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];
const K: u64 = 1024;

/// Human-readable size using binary units, e.g. `1536` -> `"1.5 KB"`.
///
/// The value is rounded to two decimals and printed without trailing zeros.
/// Sizes past the last unit stay in `PB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    let mut divisor = 1u64;
    while index < UNITS.len() - 1 && bytes / divisor >= K {
        divisor *= K;
        index += 1;
    }

    let value = bytes as f64 / divisor as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[index])
}
