use clap::Parser;
use color_print::cprintln;
use std::fs;
use std::path::Path;
use wskc::codegen::CodeGen;
use wskc::parser::Parser as WskParser;
use wskc::printer;
use wskc::scanner::Scanner;
use wskc::Error;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Input script
    input: String,

    /// Output directory for the generated sources
    #[clap(short, long, default_value = "generated")]
    out_dir: String,

    /// Dump tokens and the parsed tree
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        cprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    // 1. Read and scan the script
    let source = fs::read_to_string(&args.input)?;
    let tokens = Scanner::new(&source).scan()?;

    if args.verbose {
        println!("=== TOKENS ===");
        for token in &tokens {
            println!("{:>4}: {:?} '{}'", token.line, token.kind, token.lexeme);
        }
        println!();
    }

    // 2. Parse tokens into a program
    let program = WskParser::new(tokens.into_iter()).parse()?;

    if args.verbose {
        println!("=== AST ===");
        print!("{}", printer::program(&program));
        println!("=== ENTITIES ===");
        println!("Found {} entities", program.entities.len());
        for entity in &program.entities {
            println!("Entity: {} ({} fields)", entity.name, entity.fields.len());
        }
        println!();
    }

    // 3. Generate the two artifacts
    let artifacts = CodeGen::generate(&program);

    // 4. Write them next to each other in the output directory
    let out_dir = Path::new(&args.out_dir);
    fs::create_dir_all(out_dir)?;
    let header_path = out_dir.join("game_generated.h");
    let source_path = out_dir.join("game_generated.c");
    fs::write(&header_path, &artifacts.header)?;
    fs::write(&source_path, &artifacts.source)?;

    println!(
        "Compiled {} to {} and {}",
        args.input,
        header_path.display(),
        source_path.display()
    );
    Ok(())
}
