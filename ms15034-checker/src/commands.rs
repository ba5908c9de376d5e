use clap::arg;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("ms15034-checker")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("ms15034-checker")
        .about(
            "Checks the static files of a host (or a list of hosts) for MS15-034 / \
            CVE-2015-1635, the HTTP.sys Range header overflow.",
        )
        .override_usage("ms15034-checker [OPTIONS] <URL-OR-FILE>")
        .styles(CLAP_STYLING)
        .arg(
            arg!([TARGET])
                .value_name("URL-OR-FILE")
                .required(false)
                .help("A URL to check, or a file of newline-delimited URLs"),
        )
        .arg(
            arg!(-p --"proxy" <PROXY>)
                .required(false)
                .help("Proxy to use, e.g: socks5://127.0.0.1:9090"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("The number of seconds for the request to be performed")
                .value_parser(clap::value_parser!(u64))
                .default_value("20"),
        )
        .arg(
            arg!(--"connect-timeout" <SECONDS>)
                .required(false)
                .help("The number of seconds for the connection to be established before timeout")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(--"user-agent" <USER_AGENT>)
                .required(false)
                .help("User-Agent header sent with every request"),
        )
        .arg(
            arg!(--"vulnerable-signature" <REGEX>)
                .required(false)
                .help("Case-insensitive pattern marking a probe response as vulnerable"),
        )
        .arg(
            arg!(--"safe-signature" <REGEX>)
                .required(false)
                .help("Case-insensitive pattern marking a probe response as safe"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(-v --"verbose" "Verbose mode")
                .required(false)
                .action(clap::ArgAction::SetTrue),
        )
}
