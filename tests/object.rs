use pretty_assertions::assert_eq;

use sicxe_asm::diag::Diagnostics;
use sicxe_asm::hex::sub_hex;
use sicxe_asm::locctr::first_pass;
use sicxe_asm::object::{emit, TextRecord};
use sicxe_asm::resolve::resolve;
use sicxe_asm::{AsmConfig, AsmError, Instruction};

fn build(src: &[&str]) -> Vec<Instruction> {
    let mut diags = Diagnostics::new();
    let mut list = first_pass(src, &mut diags).unwrap();
    resolve(&mut list, &mut diags).unwrap();
    list
}

const SMALL: &[&str] = &[
    "SUM START 1000",
    "FIRST LDA A",
    "ADD B",
    "STA C",
    "RSUB",
    "A WORD 1",
    "B WORD 2",
    "C RESW 1",
    "END FIRST",
];

#[test]
fn header_length_and_entry_point() {
    let list = build(SMALL);
    let obj = emit(&list, &AsmConfig::default()).unwrap();

    let start = list[0].address.as_deref().unwrap();
    let end = list[8].address.as_deref().unwrap();
    assert_eq!(end, "1015");
    let length = format!("{:0>6}", sub_hex(end, start).unwrap());
    assert_eq!(obj.header.name, "SUM");
    assert_eq!(obj.header.start, "001000");
    assert_eq!(obj.header.length, length);
    assert_eq!(obj.end.entry, "001000");

    assert_eq!(
        obj.to_string(),
        "H^SUM^001000^000015\n\
         T^001000^12^00100C^18100F^0C1012^4C0000^000001^000002\n\
         E^001000\n"
    );
}

#[test]
fn text_records_chunk_by_capacity() {
    let list = build(SMALL);
    let cfg = AsmConfig {
        text_record_capacity: 4,
        ..AsmConfig::default()
    };
    let obj = emit(&list, &cfg).unwrap();
    assert_eq!(obj.text.len(), 2);
    assert_eq!(obj.text[0].address, "001000");
    assert_eq!(obj.text[0].opcodes.len(), 4);
    assert_eq!(obj.text[1].address, "00100C");
    assert_eq!(obj.text[1].to_string(), "T^00100C^06^000001^000002");
}

#[test]
fn unresolved_lines_are_left_out_of_text() {
    let list = build(&["P START 0", "LDA NOPE", "RSUB", "END P"]);
    let obj = emit(&list, &AsmConfig::default()).unwrap();
    assert_eq!(obj.text.len(), 1);
    assert_eq!(obj.text[0].address, "000003");
    assert_eq!(obj.text[0].opcodes, ["4C0000"]);
}

#[test]
fn default_name_without_start_label() {
    let list = build(&["START 1000", "RSUB", "END"]);
    let obj = emit(&list, &AsmConfig::default()).unwrap();
    assert_eq!(obj.header.name, "PROG");
    assert_eq!(obj.header.length, "000003");
}

#[test]
fn byte_count_is_half_the_digits() {
    let t = TextRecord {
        address: "001000".into(),
        opcodes: vec!["001000".into(), "4C0000".into(), "000005".into()],
    };
    assert_eq!(t.byte_len(), 9);
    assert_eq!(t.to_string(), "T^001000^09^001000^4C0000^000005");
}

#[test]
fn empty_and_unplaced_programs_fail() {
    let cfg = AsmConfig::default();
    assert_eq!(emit(&[], &cfg).unwrap_err(), AsmError::EmptyProgram);

    let list = build(&["RSUB"]);
    assert_eq!(list[0].address, None);
    assert_eq!(emit(&list, &cfg).unwrap_err(), AsmError::MissingAddress);
}

#[test]
fn emission_orders_by_line_number() {
    let mut list = build(SMALL);
    let sorted = emit(&list, &AsmConfig::default()).unwrap();
    list.reverse();
    assert_eq!(emit(&list, &AsmConfig::default()).unwrap(), sorted);
}

#[test]
fn lowercase_origin_matches_across_records() {
    let list = build(&["P START 1a00", "LDA X", "X WORD 1", "END P"]);
    let text = emit(&list, &AsmConfig::default()).unwrap().to_string();
    assert_eq!(
        text,
        "H^P^001A00^000006\nT^001A00^06^001A03^000001\nE^001A00\n"
    );
}

#[test]
fn odd_width_opcodes_round_the_byte_count_down() {
    let t = TextRecord {
        address: "000000".into(),
        opcodes: vec!["1000000".into()],
    };
    assert_eq!(t.byte_len(), 3);
    assert_eq!(t.to_string(), "T^000000^03^1000000");
}
