//! Assembler for the nginx configuration
//!
//! Combines the fixed preamble with the generated locations into a single
//! directive tree.

use crate::builders::{generate_path_location, generate_redirects, generate_rewrites};
use crate::directive::{Directive, stringify};
use edgeconf_core::{GeneratorConfig, HeadersMap, RedirectRule, RewriteRule, ValidationError};

type AssembleResult<T> = Result<T, ValidationError>;

/// Generate the configuration text
pub fn generate_configuration(
    rewrites: &[RewriteRule],
    redirects: &[RedirectRule],
    headers: &HeadersMap,
    config: &GeneratorConfig,
) -> AssembleResult<String> {
    let directives = assemble(rewrites, redirects, headers, config)?;
    Ok(stringify(&directives))
}

/// Build the top-level directives
pub fn assemble(
    rewrites: &[RewriteRule],
    redirects: &[RedirectRule],
    headers: &HeadersMap,
    config: &GeneratorConfig,
) -> AssembleResult<Vec<Directive>> {
    let server = compile_server(rewrites, redirects, headers, config)?;

    let mut directives = compile_main(config);
    directives.push(compile_events(config));
    directives.push(compile_http(server, config));

    tracing::debug!(
        header_locations = headers.len(),
        redirects = redirects.len(),
        rewrites = rewrites.len(),
        "Assembled nginx configuration"
    );

    Ok(directives)
}

fn compile_main(config: &GeneratorConfig) -> Vec<Directive> {
    let process = &config.process;
    vec![
        Directive::new("worker_processes").arg(process.worker_processes.to_string()),
        Directive::new("worker_rlimit_nofile").arg(process.worker_rlimit_nofile.to_string()),
        Directive::new("error_log")
            .arg(&process.error_log)
            .arg(&process.error_log_level),
        Directive::new("pid").arg(&process.pid),
    ]
}

fn compile_events(config: &GeneratorConfig) -> Directive {
    Directive::new("events").with_block(vec![
        Directive::new("worker_connections").arg(config.process.worker_connections.to_string()),
    ])
}

fn compile_http(server: Directive, config: &GeneratorConfig) -> Directive {
    Directive::new("http").with_block(vec![
        Directive::new("access_log").arg(&config.http.access_log),
        referer_path_map(),
        server,
    ])
}

/// `$referer_path`: the path part of the `Referer` header
fn referer_path_map() -> Directive {
    Directive::new("map")
        .with_args(["$http_referer", "$referer_path"])
        .with_block(vec![
            Directive::new("default").arg("\"\""),
            Directive::new("~^.*?://.*?/(?<path>.*)$").arg("$path"),
        ])
}

fn compile_server(
    rewrites: &[RewriteRule],
    redirects: &[RedirectRule],
    headers: &HeadersMap,
    config: &GeneratorConfig,
) -> AssembleResult<Directive> {
    let storage = &config.storage;

    let mut listen = Directive::new("listen").arg(&config.http.listen);
    if config.http.default_server {
        listen = listen.arg("default_server");
    }

    let mut directives = vec![listen, Directive::new("resolver").arg(&config.http.resolver)];

    // Exact locations win over regex ones regardless of position
    directives.extend(
        headers
            .iter()
            .map(|(path, entries)| generate_path_location(path, entries, config)),
    );

    // Regex locations are tried in declaration order
    directives.extend(generate_redirects(redirects, config)?);

    directives.push(
        Directive::new("location").arg("/").with_block(vec![
            Directive::new("try_files")
                .arg("/dev/null")
                .arg(&storage.proxy_location),
        ]),
    );

    directives.push(generate_rewrites(rewrites, config));

    directives.push(
        Directive::new("error_page")
            .with_args(storage.fallback_status_codes.iter().map(u16::to_string))
            .arg("=")
            .arg(&storage.fallback_location),
    );

    directives.push(
        Directive::new("location")
            .arg(&storage.proxy_location)
            .with_block(vec![
                Directive::new("proxy_pass").arg(format!("{}$uri", storage.origin)),
                Directive::new("proxy_intercept_errors").arg("on"),
            ]),
    );

    Ok(Directive::new("server").with_block(directives))
}
