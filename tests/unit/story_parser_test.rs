//! Unit tests for story title extraction and filename conventions.

use czytelnia::services::story_parser::{
    extract_title, is_story_file, parse_filename, story_id, title_from_filename,
};
use rstest::rstest;

#[rstest]
#[case("CZEŚĆ DZIECI!\n3. Kot i pies\nBył sobie kot.", "Kot i pies")]
#[case("CZEŚĆ!\nMAM NA IMIĘ ANIA.\nWielka przygoda\nTekst.", "Wielka przygoda")]
#[case("\n\n   Zimowy poranek   \nŚnieg.", "Zimowy poranek")]
#[case("12.Las\nDrzewa szumią.", "Las")]
#[case("7.\nPrawdziwy tytuł", "Prawdziwy tytuł")]
#[case("2024 rok był dobry\nTekst.", "2024 rok był dobry")]
fn test_title_from_content(#[case] content: &str, #[case] expected: &str) {
    assert_eq!(extract_title(content, "01-cokolwiek.txt"), expected);
}

#[rstest]
#[case("", "07-mala-dziewczynka.txt", "Mala Dziewczynka")]
#[case("CZEŚĆ WSZYSTKIM!\nMAM NA IMIĘ OLA.", "07-mala-dziewczynka.txt", "Mala Dziewczynka")]
#[case("   \n\t\n", "3-kot.txt", "Kot")]
#[case("1.\n2.\n3.", "10-zielony-smok.txt", "Zielony Smok")]
fn test_title_falls_back_to_filename(
    #[case] content: &str,
    #[case] filename: &str,
    #[case] expected: &str,
) {
    assert_eq!(extract_title(content, filename), expected);
}

#[test]
fn test_title_scan_stops_after_five_lines() {
    let content = "CZEŚĆ 1\nCZEŚĆ 2\nCZEŚĆ 3\nCZEŚĆ 4\nCZEŚĆ 5\nZa późno na tytuł";
    assert_eq!(extract_title(content, "05-spoznienie.txt"), "Spoznienie");
}

#[rstest]
#[case("07-mala-dziewczynka.txt", "Mala Dziewczynka")]
#[case("mala-dziewczynka.txt", "Mala Dziewczynka")]
#[case("01-łódź.txt", "Łódź")]
fn test_title_from_filename(#[case] filename: &str, #[case] expected: &str) {
    assert_eq!(title_from_filename(filename), expected);
}

#[rstest]
#[case("07-mala-dziewczynka.txt", Some((7, "mala-dziewczynka")))]
#[case("120-koniec.txt", Some((120, "koniec")))]
#[case("bez-numeru.txt", None)]
#[case("07-.txt", None)]
#[case("07-kot.md", None)]
#[case("-kot.txt", None)]
fn test_parse_filename(#[case] filename: &str, #[case] expected: Option<(i64, &str)>) {
    assert_eq!(parse_filename(filename), expected);
}

#[test]
fn test_story_id_and_extension() {
    assert_eq!(story_id("07-mala-dziewczynka.txt"), "07-mala-dziewczynka");
    assert!(is_story_file("07-mala-dziewczynka.txt"));
    assert!(!is_story_file("notes.md"));
}
