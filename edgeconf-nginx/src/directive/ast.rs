//! Directive tree for nginx configuration
//!
//! A configuration is a list of directives:
//! - Statements (Name + Args), rendered with a trailing `;`
//! - Blocks (Name + Args + children), rendered as `{ ... }`

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Directive name (e.g. "server", "location", "proxy_pass")
    pub name: String,

    /// Arguments following the name, emitted verbatim
    pub args: Vec<String>,

    /// Child directives; `None` makes this a statement
    pub block: Option<Block>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub directives: Vec<Directive>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            block: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_block(mut self, directives: Vec<Directive>) -> Self {
        self.block = Some(Block { directives });
        self
    }

    pub fn is_block(&self) -> bool {
        self.block.is_some()
    }

    /// Name followed by the arguments
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.args.iter().map(String::as_str))
    }

    /// Child directives, empty for statements
    pub fn children(&self) -> &[Directive] {
        self.block
            .as_ref()
            .map(|block| block.directives.as_slice())
            .unwrap_or_default()
    }

    /// First child directive named `name`
    pub fn find(&self, name: &str) -> Option<&Directive> {
        self.children().iter().find(|d| d.name == name)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::stringify(std::slice::from_ref(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let location = Directive::new("location")
            .with_args(["=", "/a"])
            .with_block(vec![Directive::new("add_header").arg("X-Frame-Options").arg("\"DENY\"")]);

        assert!(location.is_block());
        assert_eq!(location.tokens().collect::<Vec<_>>(), vec!["location", "=", "/a"]);
        assert_eq!(location.children().len(), 1);
        assert_eq!(location.find("add_header").unwrap().args[1], "\"DENY\"");
        assert!(location.find("proxy_pass").is_none());
    }

    #[test]
    fn test_statement_has_no_children() {
        let statement = Directive::new("resolver").arg("1.1.1.1");
        assert!(!statement.is_block());
        assert!(statement.children().is_empty());
        assert_eq!(statement.to_string(), "resolver 1.1.1.1;");
    }
}
