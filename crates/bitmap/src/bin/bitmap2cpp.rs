use {
    anyhow::Result,
    base::{Rect, init_stdout_logger, log_fatal},
    bitmap::{ConvertOptions, Schema, convert_to_bmp, convert_to_source, write_source_file},
    std::path::PathBuf,
};

fn usage(program: &str) {
    println!("Usage  : {program} [OPTIONS] INPUT...");
    println!();
    println!("INPUT  : Input image file. Currently, only the PNG file format is supported");
    println!();
    println!("Options:");
    println!("  -o, --output PATH   C++ source file to be generated (stdout if omitted)");
    println!("  -a, --alpha         pack an interleaved opacity plane");
    println!("      --legacy        emit the legacy indexed-constants schema");
    println!("      --filter-red    classify only pure red pixels as visible (24-bit input)");
    println!("      --bmp           write one BMP mask preview per input instead of source text");
    println!("      --rect L,T,R,B  restrict processing to a sub-rectangle");
    println!("  -h, --help          print this help");
}

fn usage_error(program: &str, message: &str) -> ! {
    eprintln!("{program}: {message}");
    usage(program);
    std::process::exit(2);
}

fn parse_rect(program: &str, arg: &str) -> Rect {
    let edges: Vec<i32> = arg
        .split(',')
        .map(|v| v.trim().parse())
        .collect::<Result<_, _>>()
        .unwrap_or_else(|_| usage_error(program, &format!("invalid rect '{arg}'")));
    if edges.len() != 4 || edges[2] < edges[0] || edges[3] < edges[1] {
        usage_error(program, &format!("invalid rect '{arg}'"));
    }
    Rect::new(edges[0], edges[1], edges[2], edges[3])
}

fn main() -> Result<()> {
    init_stdout_logger();

    let args: Vec<String> = std::env::args().collect();
    let program = &args[0];

    let mut options = ConvertOptions::default();
    let mut output: Option<PathBuf> = None;
    let mut bmp_preview = false;
    let mut inputs: Vec<PathBuf> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                usage(program);
                return Ok(());
            }
            "-a" | "--alpha" => options.alpha = true,
            "--legacy" => options.schema = Schema::LegacyConstants,
            "--filter-red" => options.special_filter = true,
            "--bmp" => bmp_preview = true,
            "-o" | "--output" => {
                i += 1;
                match args.get(i) {
                    Some(path) => output = Some(PathBuf::from(path)),
                    None => usage_error(program, "missing argument for --output"),
                }
            }
            "--rect" => {
                i += 1;
                match args.get(i) {
                    Some(arg) => options.rect = Some(parse_rect(program, arg)),
                    None => usage_error(program, "missing argument for --rect"),
                }
            }
            _ if arg.starts_with('-') => {
                usage_error(program, &format!("unknown option '{arg}'"));
            }
            _ => inputs.push(PathBuf::from(arg)),
        }
        i += 1;
    }

    if inputs.is_empty() {
        usage(program);
        log_fatal!("no input files");
    }

    if bmp_preview {
        for input in &inputs {
            let out = match (&output, inputs.len()) {
                (Some(path), 1) => path.clone(),
                _ => input.with_extension("bmp"),
            };
            convert_to_bmp(input, &out, &options)?;
        }
        return Ok(());
    }

    let payload = convert_to_source(&inputs, &options)?;
    match &output {
        Some(path) => write_source_file(path, &payload)?,
        None => print!("{payload}"),
    }

    Ok(())
}
