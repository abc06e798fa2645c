use clap::Parser;
use pcx::decoding::decode_image;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(about = "Decodes a pcx file to another image file", long_about = None)]
#[command(version)]
struct Args {
    /// The input pcx file.
    #[arg(short, long)]
    input: PathBuf,

    /// The output file. The output format will be determined using
    /// the extension of the output file.
    #[arg(short, long)]
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let input_file = match File::open(args.input) {
        Err(e) => {
            println!("Cannot open input file: {}", e);
            process::exit(1);
        }
        Ok(f) => f,
    };

    let reader = BufReader::new(input_file);

    let image = match decode_image(reader) {
        Err(error) => {
            println!("Error while decoding the image: {:?}", error);
            process::exit(1)
        }
        Ok(d) => d,
    };

    if let Err(e) = image.save(args.output) {
        println!("Cannot save image: {}", e);
        process::exit(1)
    }
}
