/// One level of indentation in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tab,
}

impl Indent {
    pub fn unit(&self) -> String {
        match self {
            Indent::Spaces(width) => " ".repeat(*width),
            Indent::Tab => "\t".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenConfig {
    pub indent: Indent,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            indent: Indent::Spaces(4),
        }
    }
}

impl CodegenConfig {
    pub fn with_indent(indent: Indent) -> Self {
        CodegenConfig { indent }
    }
}
