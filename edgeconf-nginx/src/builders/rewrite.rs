//! Client-side fallback location

use crate::directive::Directive;
use crate::pattern::convert_from_path;
use edgeconf_core::{GeneratorConfig, RewriteRule};

/// Build the client-side fallback location.
///
/// One `rewrite` per rule, in input order, then the terminal `return`.
/// nginx stops at the first matching rewrite, so more specific patterns must
/// come before general ones.
pub fn generate_rewrites(rules: &[RewriteRule], config: &GeneratorConfig) -> Directive {
    let policy = config.policy;

    let mut directives: Vec<Directive> = rules
        .iter()
        .map(|rule| {
            Directive::new("rewrite")
                .arg(convert_from_path(&rule.from_path, policy.slug))
                .arg(&rule.to_path)
                .with_args(policy.rewrite_terminal.rewrite_flag())
        })
        .collect();
    directives.push(Directive::new("return").arg(policy.rewrite_terminal.status().to_string()));

    Directive::new("location")
        .arg(&config.storage.fallback_location)
        .with_block(directives)
}
