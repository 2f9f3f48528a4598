//! `vequiv convert`.

use vequiv::{ConvertError, NativeBits, NativeValue, PathSegment, ValuePath, convert, parse_interp};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_UNSUPPORTED};
use crate::terminal::{self, Alignment, Table};

pub fn cmd_convert(value: &str) -> i32 {
    let value = match parse_interp(value) {
        Ok(v) => v,
        Err(e) => {
            terminal::error(&format!("invalid interpreter value: {e}"));
            return EXIT_FAILURE;
        }
    };

    match convert(&value) {
        Ok(native) => {
            println!("{native}");
            let (table, rows) = word_table(&native);
            if rows > 0 {
                table.print();
            }
            EXIT_SUCCESS
        }
        Err(ConvertError::Unsupported(e)) => {
            terminal::warning(&format!("not convertible: {e}"));
            EXIT_UNSUPPORTED
        }
        Err(e @ ConvertError::Value(_)) => {
            terminal::error(&e.to_string());
            EXIT_FAILURE
        }
    }
}

/// One row per native word of every bits leaf, in traversal order.
fn word_table(value: &NativeValue) -> (Table, usize) {
    let mut leaves = Vec::new();
    collect_leaves(value, &mut ValuePath::root(), &mut leaves);

    let mut table = Table::new(&["leaf", "bits", "word", "value"]).with_alignments(vec![
        Alignment::Left,
        Alignment::Right,
        Alignment::Right,
        Alignment::Left,
    ]);
    let mut rows = 0;
    for (path, bits) in leaves {
        for (index, word) in bits.words().iter().enumerate() {
            table.add_row(vec![
                path.to_string(),
                bits.bit_count().to_string(),
                index.to_string(),
                format!("{word:#018x}"),
            ]);
            rows += 1;
        }
    }
    (table, rows)
}

fn collect_leaves<'a>(
    value: &'a NativeValue,
    path: &mut ValuePath,
    out: &mut Vec<(ValuePath, &'a NativeBits)>,
) {
    let (children, segment): (&[NativeValue], fn(usize) -> PathSegment) = match value {
        NativeValue::Bits(bits) => {
            out.push((path.clone(), bits));
            return;
        }
        NativeValue::Array(elements) => (elements, PathSegment::Index),
        NativeValue::Tuple(members) => (members, PathSegment::Member),
    };
    for (i, child) in children.iter().enumerate() {
        path.push(segment(i));
        collect_leaves(child, path, out);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_table_lists_every_word() {
        let native = convert(&parse_interp("(sN[65]:-1, [u1:1])").unwrap()).unwrap();
        let (table, rows) = word_table(&native);
        assert_eq!(rows, 3);
        let rendered = table.render();
        assert!(rendered.contains("$.0"));
        assert!(rendered.contains("$.1[0]"));
        assert!(rendered.contains("0xffffffffffffffff"));
        assert!(rendered.contains("0x0000000000000001"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(cmd_convert("[u8:1, u8:2]"), EXIT_SUCCESS);
        assert_eq!(cmd_convert("fn f"), EXIT_UNSUPPORTED);
        assert_eq!(cmd_convert("u8"), EXIT_FAILURE);
    }
}
