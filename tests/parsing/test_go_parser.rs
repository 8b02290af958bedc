use cartograph_core::types::Language;
use cartograph_parsers::treesitter::parse_file;

#[test]
fn parses_a_small_go_file_and_reports_its_language_and_loc() {
    let source = b"package main\n\nfunc main() {}\n";
    let result = parse_file("main.go", source, Language::Go).unwrap();
    assert_eq!(result.file.path, "main.go");
    assert_eq!(result.file.language, Language::Go);
    assert_eq!(result.file.loc, 4);
    assert_eq!(result.symbols.len(), 1);
}

#[test]
fn malformed_source_still_yields_a_parse_result() {
    let source = b"package main\n\nfunc (((\n";
    let result = parse_file("broken.go", source, Language::Go);
    assert!(result.is_ok());
}
