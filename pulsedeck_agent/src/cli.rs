//! Port argument parsing, kept out of `main` for testability.

pub const DEFAULT_PORT: u16 = 8080;

/// Recognizes `--port N`, `-p N` and `--port=N`.
pub fn parse_port<I: IntoIterator<Item = String>>(args: I) -> Option<u16> {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut long: Option<String> = None;
    let mut short: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--port" => long = it.next(),
            "-p" => short = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    long = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    long.or(short).and_then(|s| s.parse::<u16>().ok())
}

/// CLI beats the `PULSEDECK_PORT` env var, which beats the default.
pub fn resolve_port<I: IntoIterator<Item = String>>(args: I) -> u16 {
    parse_port(args)
        .or_else(|| {
            std::env::var("PULSEDECK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .unwrap_or(DEFAULT_PORT)
}
