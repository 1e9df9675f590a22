// Not every test binary uses every macro.
#![allow(unused)]

// Shared macros for the integration suite.
//
// Each case expands to one #[test] that drives the public `abacus` API
// end to end, from text to a numeric value or a classified error.

macro_rules! eval_case {
    ($name:ident, input: $input:expr, value: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            match abacus::evaluate($input) {
                Ok(v) => pretty_assertions::assert_eq!(v, $value, "wrong value for {:?}", $input),
                Err(e) => panic!("evaluation failed for {:?}: {e}", $input),
            }
        }
    };
}

macro_rules! error_case {
    ($name:ident, input: $input:expr, error: $pattern:pat $(,)?) => {
        #[test]
        fn $name() {
            match abacus::evaluate($input) {
                Ok(v) => panic!("expected an error for {:?}, got {v}", $input),
                Err(e) => assert!(matches!(e, $pattern), "wrong error for {:?}: {e:?}", $input),
            }
        }
    };
}

pub(crate) use error_case;
pub(crate) use eval_case;
