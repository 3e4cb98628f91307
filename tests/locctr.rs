use sicxe_asm::diag::{DiagnosticKind, Diagnostics};
use sicxe_asm::locctr::{first_pass, size_of};
use sicxe_asm::parser::parse_line;
use sicxe_asm::AsmError;

fn addresses(src: &[&str]) -> Vec<Option<String>> {
    let mut diags = Diagnostics::new();
    first_pass(src, &mut diags)
        .unwrap()
        .into_iter()
        .map(|i| i.address)
        .collect()
}

#[test]
fn three_byte_instructions_advance_by_three() {
    let mut src = vec!["P START 1000"];
    src.extend(std::iter::repeat("LDA X").take(6));
    src.push("END P");
    let addrs = addresses(&src);

    assert_eq!(addrs[0].as_deref(), Some("1000"));
    for k in 0..6 {
        let want = format!("{:X}", 0x1000 + 3 * k);
        assert_eq!(addrs[k + 1].as_deref(), Some(want.as_str()));
    }
    // END sits right after the last instruction
    assert_eq!(addrs[7].as_deref(), Some("1012"));
}

#[test]
fn reservations_are_decimal_counts() {
    let mut diags = Diagnostics::new();
    let resw = parse_line(1, "T RESW 100").unwrap();
    let resb = parse_line(2, "B RESB 100").unwrap();
    let word = parse_line(3, "W WORD 100").unwrap();
    assert_eq!(size_of(&resw, &mut diags), "12C");
    assert_eq!(size_of(&resb, &mut diags), "64");
    assert_eq!(size_of(&word, &mut diags), "3");
    assert!(diags.is_empty());

    let bad = parse_line(4, "B RESB 1F").unwrap();
    assert_eq!(size_of(&bad, &mut diags), "3");
    assert!(matches!(
        diags.iter().next().unwrap().kind,
        DiagnosticKind::BadReserveCount { .. }
    ));
}

#[test]
fn reservations_shift_following_lines() {
    let addrs = addresses(&[
        "P START 0",
        "A RESW 2",
        "B RESB 5",
        "C WORD 1",
        "END P",
    ]);
    let addrs: Vec<_> = addrs.iter().map(|a| a.as_deref().unwrap()).collect();
    assert_eq!(addrs, ["0", "0", "6", "B", "E"]);
}

#[test]
fn missing_start_defaults_to_zero() {
    let mut diags = Diagnostics::new();
    let list = first_pass(["LDA X", "LDA Y", "LDA Z"], &mut diags).unwrap();
    assert_eq!(list[0].address, None);
    assert_eq!(list[1].address.as_deref(), Some("0"));
    assert_eq!(list[2].address.as_deref(), Some("3"));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags.iter().next().unwrap().kind, DiagnosticKind::MissingStart);
    assert_eq!(list.iter().map(|i| i.line).collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn second_start_is_rejected() {
    let mut diags = Diagnostics::new();
    let err = first_pass(["A START 100", "LDA X", "B START 200"], &mut diags).unwrap_err();
    assert!(matches!(err, AsmError::DuplicateStart { line: 3, first: 1, .. }));
}

#[test]
fn bad_origin_is_fatal() {
    let mut diags = Diagnostics::new();
    let err = first_pass(["A START XYZ", "LDA X"], &mut diags).unwrap_err();
    match err {
        AsmError::Hex { line, content, .. } => {
            assert_eq!(line, 1);
            assert_eq!(content, "A START XYZ");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn addresses_past_six_digits_overflow() {
    let mut diags = Diagnostics::new();
    let err = first_pass(["A START FFFFFF", "LDA X", "LDA Y"], &mut diags).unwrap_err();
    assert!(matches!(err, AsmError::AddressOverflow { line: 3, .. }));

    let err = first_pass(["A START 0", "B RESB 99999999999", "LDA X"], &mut diags).unwrap_err();
    assert!(matches!(err, AsmError::AddressOverflow { line: 3, .. }));
}

#[test]
fn duplicate_labels_are_reported() {
    let mut diags = Diagnostics::new();
    first_pass(["P START 0", "X WORD 1", "X WORD 2", "END P"], &mut diags).unwrap();
    let d = diags.iter().next().unwrap();
    assert_eq!(d.line, 3);
    assert_eq!(
        d.kind,
        DiagnosticKind::DuplicateLabel {
            label: "X".into(),
            first: 2
        }
    );
}

#[test]
fn start_without_origin_begins_at_zero() {
    let mut diags = Diagnostics::new();
    let list = first_pass(["START", "LDA X", "X WORD 1", "END"], &mut diags).unwrap();
    assert_eq!(list[0].address.as_deref(), Some("0"));
    assert_eq!(list[1].address.as_deref(), Some("0"));
    assert_eq!(list[2].address.as_deref(), Some("3"));

    let kinds: Vec<_> = diags.iter().map(|d| (d.line, d.kind.clone())).collect();
    assert_eq!(kinds, vec![(1, DiagnosticKind::MissingOrigin)]);
}

#[test]
fn origin_is_normalized() {
    assert_eq!(addresses(&["P START 1a00", "RSUB"])[1].as_deref(), Some("1A00"));
    assert_eq!(addresses(&["P START 0001000", "RSUB"])[1].as_deref(), Some("1000"));
}
