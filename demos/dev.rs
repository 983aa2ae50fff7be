use flagstack::{FlagDefinition, FlagParser, FlagType};

fn main() {
    let parser = FlagParser::from_flags([FlagDefinition::new(
        "verbose",
        Some('v'),
        FlagType::Count,
    )
    .with_default(-1)
    .help("Increase the logging verbosity; repeat for more.")]);

    let result = parser.parse_env();
    println!("{result:#?}");
}
