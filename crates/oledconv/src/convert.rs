//! Line and block conversion.
use crate::{
    call::{find_call, CallSite},
    coords::convert_coordinates,
    error::ConvertError,
    function::{
        mentions_display_call, FunctionDescriptor, FunctionKind, CLEAR_CALL, FUNCTIONS,
        PRINTF_NAME, UPDATE_CALL,
    },
};
use log::debug;
use std::{fmt, str::FromStr};

pub const FONT_8X16: &str = "OLED_8X16";
pub const FONT_6X8: &str = "OLED_6X8";

const LINE_COMMENT: &str = "//";

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConversionMode {
    /// Mode 1: keep the function name, switch to the pixel parameter shape.
    #[default]
    Direct,
    /// Mode 2: collapse every call into `OLED_Printf`.
    Printf,
}

impl ConversionMode {
    pub fn label(self) -> &'static str {
        match self {
            ConversionMode::Direct => "Direct function conversion",
            ConversionMode::Printf => "OLED_Printf conversion",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            ConversionMode::Direct => 1,
            ConversionMode::Printf => 2,
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for ConversionMode {
    type Error = ConvertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ConversionMode::Direct),
            2 => Ok(ConversionMode::Printf),
            other => Err(ConvertError::UnknownMode(other.to_string())),
        }
    }
}

impl FromStr for ConversionMode {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "direct" => Ok(ConversionMode::Direct),
            "2" | "printf" => Ok(ConversionMode::Printf),
            _ => Err(ConvertError::UnknownMode(s.to_string())),
        }
    }
}

/// Per-invocation settings for a block conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionContext {
    pub mode: ConversionMode,
    /// Inserted verbatim as the font argument.
    pub font_size: String,
    /// Prepend `OLED_Clear();`.
    pub add_clear: bool,
    /// Append `OLED_Update();` when at least one line was converted.
    pub add_update: bool,
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self {
            mode: ConversionMode::Direct,
            font_size: FONT_8X16.to_string(),
            add_clear: false,
            add_update: true,
        }
    }
}

impl ConversionContext {
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_font_size(mut self, font_size: impl Into<String>) -> Self {
        self.font_size = font_size.into();
        self
    }

    pub fn with_clear(mut self, add_clear: bool) -> Self {
        self.add_clear = add_clear;
        self
    }

    pub fn with_update(mut self, add_update: bool) -> Self {
        self.add_update = add_update;
        self
    }
}

/// Result of a whole-block conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockOutput {
    pub text: String,
    /// Output lines mentioning `OLED_Printf` or one of the six names.
    pub converted: usize,
    pub mode: ConversionMode,
}

impl BlockOutput {
    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    /// Status line in the form `Converted <n> functions using <label>`.
    pub fn summary(&self) -> String {
        format!(
            "Converted {} functions using {}",
            self.converted,
            self.mode_label()
        )
    }
}

fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// The conversion engine. Holds only the immutable descriptor table, so a
/// single instance can be shared freely across threads.
#[derive(Copy, Clone, Debug)]
pub struct Converter {
    table: &'static [FunctionDescriptor],
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self { table: &FUNCTIONS }
    }

    pub fn functions(&self) -> &'static [FunctionDescriptor] {
        self.table
    }

    /// Extract a convertible call from `line`.
    ///
    /// Blank and `//` lines never yield a call. Names are tried in table
    /// order and the first call with the old shape's argument count wins.
    /// Calls that already have the new shape's arity or more, including old
    /// calls with extra arguments such as `OLED_ShowChar(1, 1, 'a', extra);`,
    /// are left alone so that a second pass over converted output is a no-op.
    pub fn recognize(&self, line: &str) -> Option<CallSite> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(LINE_COMMENT) {
            return None;
        }
        find_call(trimmed)
    }

    /// Convert one line, or return it unchanged if no call is recognized.
    ///
    /// A converted line keeps the input's leading indentation; anything else
    /// on the line outside the call is dropped.
    pub fn convert_line(&self, line: &str, mode: ConversionMode, font_size: &str) -> String {
        let Some(call) = self.recognize(line) else {
            return line.to_string();
        };
        let converted = match mode {
            ConversionMode::Direct => self.convert_direct(&call, font_size),
            ConversionMode::Printf => self.convert_to_printf(&call, font_size),
        };
        debug!("{} -> {}", line.trim(), converted.replace('\n', " | "));

        let indent = &line[..line.len() - line.trim_start().len()];
        if indent.is_empty() {
            return converted;
        }
        converted
            .split('\n')
            .map(|l| format!("{indent}{l}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Mode 1: `name(X, Y, <args from index 2>, font)`.
    pub fn convert_direct(&self, call: &CallSite, font_size: &str) -> String {
        let (x, y) = convert_coordinates(&call.args[0], &call.args[1]);
        let mut params = Vec::with_capacity(call.args.len() + 1);
        params.push(x.to_string());
        params.push(y.to_string());
        params.extend(call.args[2..].iter().cloned());
        params.push(font_size.to_string());
        format!("{}({});", call.function.new_name, params.join(", "))
    }

    /// Mode 2: `OLED_Printf(X, Y, font, format, values...)`.
    ///
    /// Binary numbers have no printf conversion and become a commented
    /// placeholder.
    pub fn convert_to_printf(&self, call: &CallSite, font_size: &str) -> String {
        let (x, y) = convert_coordinates(&call.args[0], &call.args[1]);
        let args = &call.args;
        match call.function.kind {
            FunctionKind::Char => {
                format!(r#"{PRINTF_NAME}({x}, {y}, {font_size}, "%c", {});"#, args[2])
            }
            FunctionKind::String => format!("{PRINTF_NAME}({x}, {y}, {font_size}, {});", args[2]),
            FunctionKind::Num => format!(
                r#"{PRINTF_NAME}({x}, {y}, {font_size}, "%{}d", {});"#,
                args[3], args[2]
            ),
            FunctionKind::SignedNum => format!(
                r#"{PRINTF_NAME}({x}, {y}, {font_size}, "%+{}d", {});"#,
                args[3], args[2]
            ),
            FunctionKind::HexNum => format!(
                r#"{PRINTF_NAME}({x}, {y}, {font_size}, "%{}X", {});"#,
                args[3], args[2]
            ),
            FunctionKind::BinNum => format!(
                "// Note: Binary display requires custom formatting\n\
                 // {PRINTF_NAME}({x}, {y}, {font_size}, \"%{}s\", binary_string);",
                args[3]
            ),
        }
    }

    /// Convert a whole block line by line.
    ///
    /// Input containing `\r\n` is rejoined with `\r\n` throughout, including
    /// the inserted clear/update lines and the two-line binary placeholder;
    /// otherwise lines are joined with `\n`.
    pub fn convert_block(&self, text: &str, context: &ConversionContext) -> BlockOutput {
        let mut lines = Vec::new();
        if context.add_clear {
            lines.push(CLEAR_CALL.to_string());
        }

        let eol = line_ending(text);
        let mut converted = 0;
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let out = self.convert_line(line, context.mode, &context.font_size);
            if mentions_display_call(&out) {
                converted += 1;
            }
            if eol == "\r\n" && out.contains('\n') {
                lines.push(out.replace('\n', eol));
            } else {
                lines.push(out);
            }
        }

        if context.add_update && converted > 0 {
            lines.push(String::new());
            lines.push(UPDATE_CALL.to_string());
        }

        debug!(
            "block: {} lines, {converted} converted, mode {}",
            lines.len(),
            context.mode.number()
        );
        BlockOutput {
            text: lines.join(eol),
            converted,
            mode: context.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(line: &str) -> String {
        Converter::new().convert_line(line, ConversionMode::Direct, FONT_8X16)
    }

    fn printf(line: &str) -> String {
        Converter::new().convert_line(line, ConversionMode::Printf, FONT_8X16)
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("1".parse::<ConversionMode>().unwrap(), ConversionMode::Direct);
        assert_eq!("Printf".parse::<ConversionMode>().unwrap(), ConversionMode::Printf);
        assert!(matches!(
            "3".parse::<ConversionMode>(),
            Err(ConvertError::UnknownMode(m)) if m == "3"
        ));
        assert!(ConversionMode::try_from(0).is_err());
        assert_eq!(ConversionMode::try_from(2).unwrap().number(), 2);
    }

    #[test]
    fn default_context_matches_tool_defaults() {
        let ctx = ConversionContext::default();
        assert_eq!(ctx.mode, ConversionMode::Direct);
        assert_eq!(ctx.font_size, "OLED_8X16");
        assert!(!ctx.add_clear);
        assert!(ctx.add_update);
    }

    #[test]
    fn direct_numeric() {
        assert_eq!(
            direct("OLED_ShowNum(2, 1, 1234, 4);"),
            "OLED_ShowNum(0, 16, 1234, 4, OLED_8X16);"
        );
    }

    #[test]
    fn direct_symbolic() {
        assert_eq!(
            direct("OLED_ShowChar(r, c, ch);"),
            "OLED_ShowChar((c - 1) * 8, (r - 1) * 16, ch, OLED_8X16);"
        );
    }

    #[test]
    fn indentation_is_kept() {
        assert_eq!(
            direct("    OLED_ShowString(1, 3, \"Hi\");"),
            "    OLED_ShowString(16, 0, \"Hi\", OLED_8X16);"
        );
    }

    #[test]
    fn unrecognized_lines_are_verbatim() {
        for line in ["  int x = 1;  ", "", "   ", "// OLED_ShowNum(1, 1, 2, 3);"] {
            assert_eq!(direct(line), line);
        }
    }

    #[test]
    fn too_few_arguments_pass_through() {
        assert_eq!(direct("OLED_ShowNum(1, 1, 5);"), "OLED_ShowNum(1, 1, 5);");
    }

    #[test]
    fn printf_hex() {
        assert_eq!(
            printf("OLED_ShowHexNum(4, 1, 0xABCD, 4);"),
            r#"OLED_Printf(0, 48, OLED_8X16, "%4X", 0xABCD);"#
        );
    }

    #[test]
    fn printf_binary_is_placeholder() {
        assert_eq!(
            printf("OLED_ShowBinNum(4, 10, 0b1101, 4);"),
            "// Note: Binary display requires custom formatting\n\
             // OLED_Printf(72, 48, OLED_8X16, \"%4s\", binary_string);"
        );
    }

    #[test]
    fn printf_binary_placeholder_is_indented_per_line() {
        let out = printf("\tOLED_ShowBinNum(1, 1, v, n);");
        for l in out.lines() {
            assert!(l.starts_with("\t//"), "{l:?}");
        }
    }
}
