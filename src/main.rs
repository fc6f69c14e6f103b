use std::process::ExitCode;

use bpaf::{construct, long, short, Parser};
use pie::{
	frontend::{
		context::SerializedBinding,
		parse::parse,
		program::{run as run_program, Output},
	},
	ir::source::lex,
	report::{report_elaboration_error, report_hole, report_parse_error, report_tokenization_error},
};
use tracing::Level;

pub fn run(source: &str, show_context: bool) -> ExitCode {
	// Parsing.
	let lexed_source = match lex(source) {
		Ok(x) => x,
		Err(e) => {
			report_tokenization_error(source, e);
			return ExitCode::FAILURE;
		}
	};

	let declarations = match parse(&lexed_source) {
		Ok(x) => x,
		Err(e) => {
			report_parse_error(&lexed_source, e);
			return ExitCode::FAILURE;
		}
	};

	// Elaboration and evaluation.
	let session = run_program(&declarations);
	for output in &session.outputs {
		match output {
			Output::Normal { ty, term } => println!("(the {ty} {term})"),
			Output::Hole { range, ty } => report_hole(source, *range, ty),
		}
	}

	if show_context {
		for (name, binding) in session.context.serialize() {
			match binding {
				SerializedBinding::Free(ty) | SerializedBinding::Claim(ty) => println!("{name} : {ty}"),
				SerializedBinding::Define(ty, value) => {
					println!("{name} : {ty}");
					println!("{name} = {value}");
				}
			}
		}
	}

	match session.error {
		Some(error) => {
			report_elaboration_error(source, &error);
			ExitCode::FAILURE
		}
		None => ExitCode::SUCCESS,
	}
}

enum InputOption {
	Direct(String),
	FilePath(String),
}

struct Options {
	input: InputOption,
	no_context: bool,
	verbose: bool,
}

fn main() -> ExitCode {
	let options: Options = construct!(Options {
		input(construct!([
			c(short('c').argument::<String>("\"program\"").help("Read input from argument").map(InputOption::Direct)),
			f(short('f').argument::<String>("PATH").help("Read input from file").map(InputOption::FilePath)),
		])),
		no_context(long("no-context").help("Do not list the final context").switch()),
		verbose(short('v').long("verbose").help("Log elaboration and proof steps").switch()),
	})
	.to_options()
	.run();

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_max_level(if options.verbose { Level::DEBUG } else { Level::WARN })
		.init();

	let input = match options.input {
		InputOption::Direct(program) => program,
		InputOption::FilePath(file_path) => match std::fs::read_to_string(&file_path) {
			Ok(input) => input,
			Err(e) => {
				eprintln!("could not read {file_path}: {e}");
				return ExitCode::FAILURE;
			}
		},
	};

	run(&input, !options.no_context)
}
