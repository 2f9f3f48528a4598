//! `vequiv decode`.

use vequiv::words_to_int;
use vequiv_bits::word_count;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

fn parse_word(word: &str) -> Result<u64, String> {
    let digits = word.replace('_', "");
    let parsed = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse(),
    };
    parsed.map_err(|e| format!("invalid word {word:?}: {e}"))
}

pub fn cmd_decode(bit_count: usize, signed: bool, words: &[String]) -> i32 {
    let words: Vec<u64> = match words.iter().map(|w| parse_word(w)).collect() {
        Ok(words) => words,
        Err(e) => {
            terminal::error(&e);
            return EXIT_FAILURE;
        }
    };

    let needed = word_count(bit_count);
    if words.len() != needed {
        terminal::warning(&format!(
            "bits[{bit_count}] uses {needed} words, got {}; missing words read as zero",
            words.len()
        ));
    }

    println!("{}", words_to_int(&words, bit_count, signed));
    EXIT_SUCCESS
}
