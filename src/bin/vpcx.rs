use clap::Parser;
use ::image::DynamicImage;
use pcx::decoding::decode_image;
use show_image::*;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(about = "Visualizes a pcx file", long_about = None)]
#[command(version)]
struct Args {
    /// The path to the pcx file.
    input: PathBuf,
}

#[show_image::main]
fn main() {
    env_logger::init();
    let args = Args::parse();

    let input_file = match File::open(&args.input) {
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
        Ok(d) => DynamicImage::ImageRgb8(d),
    };

    let filename = args.input.file_name().unwrap().to_str().unwrap();

    let window = match create_window(filename, Default::default()) {
        Err(e) => {
            println!("Cannot create window: {}", e);
            process::exit(1);
        }
        Ok(w) => w,
    };

    if let Err(e) = window.set_image(filename, image) {
        println!("Cannot show image: {}", e);
        process::exit(1);
    }

    let channel = window.event_channel().unwrap();
    for event in channel {
        if let event::WindowEvent::KeyboardInput(event) = event {
            if event.input.key_code == Some(event::VirtualKeyCode::Escape)
                && event.input.state.is_pressed()
            {
                break;
            }
        }
    }
}
