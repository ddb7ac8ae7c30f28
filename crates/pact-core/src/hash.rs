use xxhash_rust::xxh64::xxh64;

use crate::types::ContractFacts;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
fn base62_encode(mut value: u64) -> String {
    let mut result = Vec::with_capacity(11);
    while value > 0 {
        result.push(BASE62_CHARS[(value % 62) as usize]);
        value /= 62;
    }
    while result.len() < 11 {
        result.push(b'0');
    }
    result.reverse();
    result.into_iter().map(char::from).collect()
}

/// Fingerprint of a module's facts.
///
/// fingerprint = base62(xxhash64(module_path + '\0' + canonical fact lines))
///
/// Fact lines are sorted so that extraction order does not change the result.
pub fn fingerprint_facts(facts: &ContractFacts) -> String {
    let mut lines: Vec<String> = facts
        .facts
        .iter()
        .map(|f| serde_json::to_string(f).unwrap_or_default())
        .collect();
    lines.sort();

    let mut input = String::with_capacity(
        facts.module_path.len() + lines.iter().map(|l| l.len() + 1).sum::<usize>() + 1,
    );
    input.push_str(&facts.module_path);
    input.push('\0');
    for line in &lines {
        input.push_str(line);
        input.push('\n');
    }
    base62_encode(xxh64(input.as_bytes(), 0))
}
