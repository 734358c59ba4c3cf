use super::SnowflakeId;
use core::fmt;

struct Field {
    name: &'static str,
    bits: u32,
    value: u64,
}

fn center(s: impl ToString, width: usize) -> String {
    let s = s.to_string();
    let len = s.len();
    if len >= width {
        return s;
    }
    let pad = width - len;
    let left = pad / 2;
    let right = pad - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

fn write_border(f: &mut fmt::Formatter<'_>, columns: &[usize]) -> fmt::Result {
    write!(f, "        +")?;
    for &w in columns {
        write!(f, "{}+", "-".repeat(w))?;
    }
    writeln!(f)
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = String>,
    columns: &[usize],
) -> fmt::Result {
    write!(f, "        |")?;
    for (cell, &w) in cells.zip(columns) {
        write!(f, "{}|", center(cell, w))?;
    }
    writeln!(f)
}

/// Renders an ID as a bordered table of its fields in decimal and hex.
pub(super) fn write_layout_debug(f: &mut fmt::Formatter<'_>, id: &SnowflakeId) -> fmt::Result {
    let fields = [
        Field {
            name: "reserved",
            bits: 1,
            value: id.to_raw() >> 63,
        },
        Field {
            name: "timestamp",
            bits: SnowflakeId::TIMESTAMP_BITS,
            value: id.timestamp(),
        },
        Field {
            name: "node_id",
            bits: SnowflakeId::NODE_ID_BITS,
            value: id.node_id(),
        },
        Field {
            name: "sequence",
            bits: SnowflakeId::SEQUENCE_BITS,
            value: id.sequence(),
        },
    ];

    // Widest of label, decimal and hex, plus padding
    let columns: Vec<usize> = fields
        .iter()
        .map(|field| {
            let label_len = format!("{} ({})", field.name, field.bits).len();
            let dec_len = field.value.to_string().len();
            let hex_len = format!("0x{:x}", field.value).len();
            label_len.max(dec_len).max(hex_len) + 2
        })
        .collect();

    writeln!(f, "SnowflakeId {{")?;
    writeln!(f, "    raw id     : 0x{:016x} ({})", id.to_raw(), id.to_raw())?;
    writeln!(f, "    padded     : {}", id.to_padded_string())?;
    writeln!(f, "    layout     :")?;

    write_border(f, &columns)?;
    write_row(
        f,
        fields.iter().map(|field| format!("{} ({})", field.name, field.bits)),
        &columns,
    )?;
    write_border(f, &columns)?;
    write_row(f, fields.iter().map(|field| field.value.to_string()), &columns)?;
    write_row(
        f,
        fields.iter().map(|field| format!("0x{:x}", field.value)),
        &columns,
    )?;
    write_border(f, &columns)?;

    write!(f, "}}")
}
