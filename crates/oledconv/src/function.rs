//! Descriptor table for the six recognized OLED driver functions.

/// Name of the unified formatted-print call emitted in printf mode.
pub const PRINTF_NAME: &str = "OLED_Printf";
/// Line prepended when the clear flag is set.
pub const CLEAR_CALL: &str = "OLED_Clear();";
/// Line appended when the update flag is set and something was converted.
pub const UPDATE_CALL: &str = "OLED_Update();";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Char,
    String,
    Num,
    SignedNum,
    HexNum,
    BinNum,
}

/// Old and new parameter shapes of one driver function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub kind: FunctionKind,
    pub name: &'static str,
    pub old_params: &'static [&'static str],
    pub new_params: &'static [&'static str],
    pub new_name: &'static str,
}

impl FunctionDescriptor {
    /// Minimum argument count for a call to be converted.
    pub fn min_args(&self) -> usize {
        self.old_params.len()
    }

    /// Argument count of a call that already uses the new shape.
    pub fn new_arity(&self) -> usize {
        self.new_params.len()
    }

    pub fn old_signature(&self) -> String {
        format!("{}({})", self.name, self.old_params.join(", "))
    }

    pub fn new_signature(&self) -> String {
        format!("{}({})", self.new_name, self.new_params.join(", "))
    }
}

const NUM_OLD: &[&str] = &["uint8_t Line", "uint8_t Column", "uint32_t Number", "uint8_t Length"];
const NUM_NEW: &[&str] = &[
    "int16_t X",
    "int16_t Y",
    "uint32_t Number",
    "uint8_t Length",
    "uint8_t FontSize",
];

/// Recognition order. The first name that matches a line wins.
pub static FUNCTIONS: [FunctionDescriptor; 6] = [
    FunctionDescriptor {
        kind: FunctionKind::Char,
        name: "OLED_ShowChar",
        old_params: &["uint8_t Line", "uint8_t Column", "char Char"],
        new_params: &["int16_t X", "int16_t Y", "char Char", "uint8_t FontSize"],
        new_name: "OLED_ShowChar",
    },
    FunctionDescriptor {
        kind: FunctionKind::String,
        name: "OLED_ShowString",
        old_params: &["uint8_t Line", "uint8_t Column", "char *String"],
        new_params: &["int16_t X", "int16_t Y", "char *String", "uint8_t FontSize"],
        new_name: "OLED_ShowString",
    },
    FunctionDescriptor {
        kind: FunctionKind::Num,
        name: "OLED_ShowNum",
        old_params: NUM_OLD,
        new_params: NUM_NEW,
        new_name: "OLED_ShowNum",
    },
    FunctionDescriptor {
        kind: FunctionKind::SignedNum,
        name: "OLED_ShowSignedNum",
        old_params: &["uint8_t Line", "uint8_t Column", "int32_t Number", "uint8_t Length"],
        new_params: &[
            "int16_t X",
            "int16_t Y",
            "int32_t Number",
            "uint8_t Length",
            "uint8_t FontSize",
        ],
        new_name: "OLED_ShowSignedNum",
    },
    FunctionDescriptor {
        kind: FunctionKind::HexNum,
        name: "OLED_ShowHexNum",
        old_params: NUM_OLD,
        new_params: NUM_NEW,
        new_name: "OLED_ShowHexNum",
    },
    FunctionDescriptor {
        kind: FunctionKind::BinNum,
        name: "OLED_ShowBinNum",
        old_params: NUM_OLD,
        new_params: NUM_NEW,
        new_name: "OLED_ShowBinNum",
    },
];

pub fn descriptor(kind: FunctionKind) -> &'static FunctionDescriptor {
    match kind {
        FunctionKind::Char => &FUNCTIONS[0],
        FunctionKind::String => &FUNCTIONS[1],
        FunctionKind::Num => &FUNCTIONS[2],
        FunctionKind::SignedNum => &FUNCTIONS[3],
        FunctionKind::HexNum => &FUNCTIONS[4],
        FunctionKind::BinNum => &FUNCTIONS[5],
    }
}

pub fn lookup(name: &str) -> Option<&'static FunctionDescriptor> {
    FUNCTIONS.iter().find(|d| d.name == name)
}

/// Whether `line` mentions the print call or any recognized function name.
///
/// Plain substring test over output text: names inside comments or string
/// literals count too.
pub fn mentions_display_call(line: &str) -> bool {
    line.contains(PRINTF_NAME) || FUNCTIONS.iter().any(|d| line.contains(d.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_matches_table_entry() {
        for d in &FUNCTIONS {
            assert_eq!(descriptor(d.kind), d);
            assert_eq!(lookup(d.name), Some(d));
        }
    }

    #[test]
    fn new_shape_adds_font_size() {
        for d in &FUNCTIONS {
            assert_eq!(d.new_arity(), d.min_args() + 1);
            assert_eq!(d.new_params.last(), Some(&"uint8_t FontSize"));
        }
    }

    #[test]
    fn signatures() {
        let d = descriptor(FunctionKind::Char);
        assert_eq!(
            d.old_signature(),
            "OLED_ShowChar(uint8_t Line, uint8_t Column, char Char)"
        );
        assert_eq!(
            d.new_signature(),
            "OLED_ShowChar(int16_t X, int16_t Y, char Char, uint8_t FontSize)"
        );
    }

    #[test]
    fn mentions_counts_any_name() {
        assert!(mentions_display_call("OLED_Printf(0, 0, OLED_8X16, \"x\");"));
        assert!(mentions_display_call("// see OLED_ShowBinNum"));
        assert!(!mentions_display_call("OLED_Clear();"));
        assert!(!mentions_display_call(""));
    }
}
