/*
ISSUER_ID='issuer_id' KEY_ID='key_id' cargo run -p apple-app-store-connect-certificates-cli --bin apple_app_store_connect_distribution_certificate_create

Or

cargo install apple-app-store-connect-certificates-cli
ISSUER_ID='issuer_id' apple_app_store_connect_distribution_certificate_create --private-key-path '/path/AuthKey_xxx.p8' --csr-path '/path/ios_distribution.csr'
*/

use std::process::ExitCode;

use apple_app_store_connect_certificates_cli::{run, Args, Config};
use clap::Parser as _;
use log::LevelFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    );

    if log_level <= LevelFilter::Info {
        builder
            .format_timestamp(None)
            .format_level(false)
            .format_target(false);
    }

    builder.init();

    let config = Config::from(args);
    let outcome = run(&config);

    ExitCode::from(outcome.exit_code())
}
