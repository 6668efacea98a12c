//! Call-site recognition and argument splitting.
use crate::function::{FunctionDescriptor, FUNCTIONS};
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

/// One recognized call extracted from a single line.
///
/// Always holds at least as many arguments as the function's old shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub(crate) function: &'static FunctionDescriptor,
    /// Argument texts as written, surrounding whitespace trimmed.
    pub(crate) args: Vec<String>,
}

impl CallSite {
    /// Returns `None` if `args` is shorter than the old parameter list.
    pub fn new(function: &'static FunctionDescriptor, args: Vec<String>) -> Option<Self> {
        if args.len() < function.min_args() {
            return None;
        }
        Some(Self { function, args })
    }

    pub fn name(&self) -> &'static str {
        self.function.name
    }

    pub fn function(&self) -> &'static FunctionDescriptor {
        self.function
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Already at the new shape's arity (or beyond), i.e. converted before.
    pub fn is_new_shape(&self) -> bool {
        self.args.len() >= self.function.new_arity()
    }
}

// Same order as FUNCTIONS.
static CALL_PATTERNS: Lazy<Vec<(&'static FunctionDescriptor, Regex)>> = Lazy::new(|| {
    FUNCTIONS
        .iter()
        .map(|d| {
            let pattern = format!(r"{}\s*\(\s*(.*?)\s*\)\s*;", regex::escape(d.name));
            let re = Regex::new(&pattern).expect("call pattern built from a literal name");
            (d, re)
        })
        .collect()
});

/// Split an argument list on commas outside quoted spans.
///
/// `"` and `'` both toggle the same in-string flag; there are no escapes.
/// A trailing fragment is kept only if it is non-empty before trimming.
pub fn parse_args(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut in_string = false;
    let mut current = String::new();

    for ch in text.chars() {
        match ch {
            '"' | '\'' => {
                in_string = !in_string;
                current.push(ch);
            }
            ',' if !in_string => {
                args.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        args.push(current.trim().to_string());
    }
    args
}

/// Find the first convertible call on `line`, trying names in table order.
///
/// A name whose call has fewer arguments than the old shape, or already has
/// the new shape's arity, is skipped and the next name is tried. Extra
/// arguments therefore count as "already converted": a call with one more
/// argument than the old shape is never rewritten. Comments are not checked
/// here.
pub fn find_call(line: &str) -> Option<CallSite> {
    CALL_PATTERNS.iter().find_map(|(function, re)| {
        let caps = re.captures(line)?;
        let inner = caps.get(1).map_or("", |m| m.as_str());
        let args = parse_args(inner);
        let argc = args.len();
        let Some(call) = CallSite::new(*function, args) else {
            trace!("{}: {argc} arguments, need {}", function.name, function.min_args());
            return None;
        };
        if call.is_new_shape() {
            trace!("{}: already in new shape ({argc} arguments)", function.name);
            return None;
        }
        Some(call)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionKind;

    #[test]
    fn quoted_commas_stay_in_one_argument() {
        assert_eq!(parse_args(r#"1, 1, "a, b""#), vec!["1", "1", r#""a, b""#]);
    }

    #[test]
    fn single_quotes_toggle_too() {
        assert_eq!(parse_args("1, 2, ','"), vec!["1", "2", "','"]);
    }

    #[test]
    fn empty_text_has_no_arguments() {
        assert!(parse_args("").is_empty());
    }

    #[test]
    fn trailing_separator_drops_nothing_extra() {
        assert_eq!(parse_args("1, 2,"), vec!["1", "2"]);
        assert_eq!(parse_args("1, 2, "), vec!["1", "2", ""]);
    }

    #[test]
    fn unbalanced_quote_swallows_rest() {
        assert_eq!(parse_args(r#"1, "a, 2"#), vec!["1", r#""a, 2"#]);
    }

    #[test]
    fn finds_call_with_spaces() {
        let call = find_call("OLED_ShowNum ( 2, 1, value, 4 ) ;").unwrap();
        assert_eq!(call.function.kind, FunctionKind::Num);
        assert_eq!(call.args, vec!["2", "1", "value", "4"]);
    }

    #[test]
    fn requires_semicolon() {
        assert!(find_call("OLED_ShowNum(2, 1, value, 4)").is_none());
    }

    #[test]
    fn nested_parens_reach_closing_semicolon() {
        let call = find_call("OLED_ShowNum(1, 1, f(x), 3);").unwrap();
        assert_eq!(call.args, vec!["1", "1", "f(x)", "3"]);
    }

    #[test]
    fn short_call_falls_through_to_next_name() {
        let call = find_call("OLED_ShowChar(1, 1); OLED_ShowNum(2, 1, 5, 2);").unwrap();
        assert_eq!(call.function.kind, FunctionKind::Num);
        assert_eq!(call.args, vec!["2", "1", "5", "2"]);
    }

    #[test]
    fn too_few_arguments_is_not_a_call() {
        assert!(find_call("OLED_ShowNum(1);").is_none());
        let d = crate::function::descriptor(FunctionKind::Num);
        assert!(CallSite::new(d, vec!["1".into()]).is_none());
        assert!(CallSite::new(d, vec!["1".into(), "1".into(), "v".into(), "2".into()]).is_some());
    }

    #[test]
    fn new_shape_is_skipped() {
        assert!(find_call("OLED_ShowChar(0, 0, 'a', OLED_8X16);").is_none());
    }

    #[test]
    fn unknown_function_is_not_recognized() {
        assert!(find_call("OLED_ShowFloat(1, 1, 2.5, 3);").is_none());
    }
}
