use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pdfstruct as pdf;
use pdf::reader::Document;

/// Inspect the structure of a PDF file: header, cross-reference table and objects.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The PDF file to read.
    file: PathBuf,

    /// Increase logging verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the object with this number.
    #[arg(long)]
    object: Option<pdf::ObjNum>,

    /// Print the object starting at this byte offset (relative to %PDF).
    #[arg(long)]
    offset: Option<pdf::Offset>,

    /// Print all objects in use.
    #[arg(long)]
    all: bool,

    /// Print the decoded data of printed stream objects.
    #[arg(long)]
    decode: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(1 + args.verbose as usize)
        .init()
        .unwrap();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", args.file.display());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), pdf::Error> {
    let mut doc = Document::open(&args.file)?;
    doc.process()?;

    println!("PDF version {}{}", doc.version()?, if doc.is_binary()? { " (binary)" } else { "" });
    if doc.start_offset()? != 0 {
        println!("Data starts at byte {}", doc.start_offset()?);
    }
    println!("xref @ {}", doc.xref_offset()?);
    for sub in &doc.xref_table()?.subsections {
        println!("{} {}", sub.start, sub.count);
        for entry in &sub.entries {
            println!("{entry}  % {}", entry.num);
        }
    }
    if let Some(trailer) = doc.trailer()? {
        println!("trailer {trailer}");
    }

    if let Some(num) = args.object {
        print_object(&doc, &format!("{num}"), doc.resolve(num), args.decode)?;
    }
    if let Some(offset) = args.offset {
        print_object(&doc, &format!("@{offset}"), doc.parse_object_at(offset), args.decode)?;
    }
    if args.all {
        for (objref, res) in doc.objects()? {
            print_object(&doc, &format!("{objref}"), res, args.decode)?;
        }
    }
    Ok(())
}

fn print_object(doc: &Document, label: &str, res: Result<pdf::Object, pdf::Error>, decode: bool) -> Result<(), pdf::Error> {
    let obj = match res {
        Ok(obj) => obj,
        Err(err) => {
            println!("{label}: {err}");
            return Ok(());
        }
    };
    println!("{label}: {obj}");
    if let (true, Some(stm)) = (decode, obj.as_stream()) {
        match doc.decoded_stream_data(stm) {
            Ok(data) => print_data(&data),
            Err(err) => println!("--- {err}")
        }
    }
    Ok(())
}

fn print_data(data: &[u8]) {
    println!("--v--v--v--");
    let mut read = 0;
    let mut special = 0;
    let mut need_nl = true;
    for &c in data {
        match c {
            0x20..=0x7E | b'\n' => {
                print!("{}", c as char);
                read += 1;
                need_nl = c != b'\n';
            },
            _ => {
                print!("\x1B[7m<{:02x}>\x1B[0m", c);
                special += 1;
            }
        }
        if read > 1000 || special > 10 {
            println!("...");
            need_nl = false;
            break;
        }
    }
    if need_nl {
        println!();
    }
    println!("--^--^--^--");
}
