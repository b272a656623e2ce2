use ferrous_stub_domain::{Header, RecordType, ResourceRecord};
use ferrous_stub_infrastructure::dns::Lookup;
use std::fmt::Write;

const RCODE_NAMES: [&str; 6] = ["NOERROR", "FORMERR", "SERVFAIL", "NXDOMAIN", "NOTIMP", "REFUSED"];

pub fn render(lookup: &Lookup) -> String {
    let message = &lookup.message;
    let header = &message.header;
    let mut out = String::new();

    let _ = writeln!(
        out,
        ";; id {} opcode {} status {} via {}",
        header.query_id,
        opcode_name(header.opcode()),
        rcode_name(header.response_code()),
        lookup.protocol,
    );
    let _ = writeln!(
        out,
        ";; flags{}; qd {} an {} ns {} ar {}",
        flag_names(header),
        header.num_questions,
        header.num_answers,
        header.num_authorities,
        header.num_additionals,
    );
    let _ = writeln!(
        out,
        ";; question {} {}",
        message.question.name_lossy(),
        RecordType::from_u16(message.question.record_type),
    );

    if header.record_count() == 0 {
        let _ = writeln!(out, ";; no records");
        return out;
    }

    for (section, records) in [
        ("answer", &message.answers),
        ("authority", &message.authorities),
        ("additional", &message.additionals),
    ] {
        if records.is_empty() {
            continue;
        }
        let _ = writeln!(out, ";; {}", section);
        for record in records {
            let _ = writeln!(out, "{}", render_record(record));
        }
    }

    out
}

fn render_record(record: &ResourceRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        record.name_lossy(),
        record.ttl,
        record.kind(),
        render_data(record)
    )
}

fn render_data(record: &ResourceRecord) -> String {
    if let Some(v4) = record.ipv4() {
        return v4.to_string();
    }
    if let Some(v6) = record.ipv6() {
        return v6.to_string();
    }
    record.data.iter().map(|b| format!("{:02x}", b)).collect()
}

fn flag_names(header: &Header) -> String {
    [
        (header.is_response(), " qr"),
        (header.is_truncated(), " tc"),
        (header.recursion_desired(), " rd"),
        (header.recursion_available(), " ra"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}

fn opcode_name(opcode: u8) -> String {
    match opcode {
        0 => "QUERY".to_string(),
        1 => "IQUERY".to_string(),
        2 => "STATUS".to_string(),
        4 => "NOTIFY".to_string(),
        5 => "UPDATE".to_string(),
        other => format!("OPCODE{}", other),
    }
}

fn rcode_name(rcode: u8) -> String {
    RCODE_NAMES
        .get(rcode as usize)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("RCODE{}", rcode))
}
