use cartograph_core::types::Language;
use cartograph_parsers::treesitter::parse_file;

#[test]
fn parses_a_small_typescript_file_and_reports_its_language_and_loc() {
    let source = b"export function main(): void {}\n";
    let result = parse_file("main.ts", source, Language::TypeScript).unwrap();
    assert_eq!(result.file.path, "main.ts");
    assert_eq!(result.file.language, Language::TypeScript);
    assert_eq!(result.file.loc, 2);
    assert_eq!(result.symbols.len(), 1);
    assert!(result.symbols[0].exported);
}

#[test]
fn tsx_source_parses_with_the_same_typescript_grammar() {
    let source = b"export const App = () => null;\n";
    let result = parse_file("App.tsx", source, Language::TypeScript).unwrap();
    assert_eq!(result.symbols.len(), 1);
}
