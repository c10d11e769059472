//! Property-based tests for template compilation and runs.

use proptest::prelude::*;
use stcg::{ErrorKind, Generator, Options};

// Text that never forms one of the default markers, with the characters
// that need escaping inside program string literals.
const PLAIN_TEXT: &str = "[a-zA-Z0-9 \n\t{}%#\"'\\\\.,;:()=+*/-]{0,64}";

fn compile(template: &str) -> Generator {
    Generator::compile(template, &Options::default()).unwrap()
}

proptest! {
    /// Templates without markers come back unchanged.
    #[test]
    fn marker_free_text_is_identity(text in PLAIN_TEXT) {
        prop_assert_eq!(compile(&text).run(&()).unwrap(), text);
    }

    /// Output regions holding string literals splice their contents in place.
    #[test]
    fn output_literals_are_spliced(
        parts in prop::collection::vec((PLAIN_TEXT, "[a-z ]{0,8}"), 0..8),
    ) {
        let mut template = String::new();
        let mut expected = String::new();
        for (text, word) in &parts {
            template.push_str(text);
            template.push_str(&format!("[>\"{}\"<]", word));
            expected.push_str(text);
            expected.push_str(word);
        }
        prop_assert_eq!(compile(&template).run(&()).unwrap(), expected);
    }

    /// Slicing arbitrary input either succeeds or fails with a syntax error.
    #[test]
    fn arbitrary_input_never_panics(input in any::<String>()) {
        if let Err(err) = Generator::compile(&input, &Options::default()) {
            prop_assert_eq!(err.kind(), ErrorKind::Syntax);
        }
    }

    /// A stray closing marker is always reported with the marker in context.
    #[test]
    fn stray_close_marker_is_localized(prefix in PLAIN_TEXT, suffix in PLAIN_TEXT) {
        let template = format!("{}<]{}", prefix, suffix);
        let err = match Generator::compile(&template, &Options::default()) {
            Ok(_) => return Err(TestCaseError::fail("expected a syntax error")),
            Err(err) => err,
        };
        let message = err.to_string();
        prop_assert!(message.starts_with("Unexpected \"<]\" marker: \""));
        prop_assert!(message.contains("<]"));
    }

    /// Running twice with the same data yields the same output.
    #[test]
    fn runs_are_deterministic(values in prop::collection::vec(any::<i32>(), 0..16)) {
        let generator = compile("[!for v in values!][>v<];[!endfor!]");
        let data = serde_json::json!({ "values": values });
        let first = generator.run(&data).unwrap();
        let second = generator.run(&data).unwrap();
        let expected: String = values.iter().map(|v| format!("{};", v)).collect();
        prop_assert_eq!(&first, &expected);
        prop_assert_eq!(first, second);
    }
}
