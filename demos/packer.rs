use flagstack::{FlagParser, Value};

const DEFINITIONS: &str = r#"{
    "name": "packer",
    "summary": "game script packer",
    "synopsis": "packer [options] DIRECTORY",
    "description": "Retrieves the scripts of a game from its directories, and packs them into a single game file.",
    "flags": [
        {"long": "pack", "short": "p", "default": "a.json", "type": "string", "help": "The game file to pack into."},
        {"long": "exit", "short": "x", "type": "boolean", "help": "Exit before packing."},
        {"long": "verbose", "short": "v", "type": "count", "help": "Increase the logging verbosity."}
    ]
}"#;

fn main() {
    let parser = match FlagParser::from_json(DEFINITIONS) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let result = parser.parse_env();

    if result["help"] == Value::Bool(true) || result.count("h") > 0 {
        parser.print_help();
        return;
    }

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
