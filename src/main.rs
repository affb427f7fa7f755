use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use flowtrack_rs::{
    BandFilter, Gate, LowerYBound, SummaryConfig, TrackingPipeline, read_records,
    write_detection_dump, write_report,
};

#[derive(Parser, Debug)]
#[command(name = "flowtrack", about = "Link flow imaging detections into particle tracks")]
struct Args {
    /// Input file with exported detection rows, sorted by elapsed time
    input: PathBuf,
    /// Output report file
    output: PathBuf,
    /// Number of header rows to skip in the input file
    #[arg(long, default_value_t = 0)]
    header_rows: usize,
    /// Seconds to look ahead for the next matching image
    #[arg(long)]
    time_seek: f64,
    /// Threshold in pixels for x variations
    #[arg(long)]
    delta_x: f64,
    /// Threshold in pixels for y variations
    #[arg(long)]
    delta_y: f64,
    /// Fractional threshold for diameter variation (e.g. 0.2)
    #[arg(long)]
    delta_d: f64,
    /// Minimum number of images to count a particle
    #[arg(long, default_value_t = 2)]
    min_members: usize,
    /// Minimum change in y pixels to count a particle
    #[arg(long, default_value_t = 10.0)]
    min_y_span: f64,
    /// Minimum center-y pixel to count an image
    #[arg(long, default_value_t = 50.0)]
    y_min: f64,
    /// Maximum center-y pixel to count an image
    #[arg(long, default_value_t = 900.0)]
    y_max: f64,
    /// Gate the upward y step with delta-y instead of delta-x
    #[arg(long)]
    symmetric_y_gate: bool,
    /// Append the per-detection dump with track ids to the report
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("cannot open input file {}", args.input.display()))?;
    let records = read_records(BufReader::new(input), args.header_rows)
        .with_context(|| format!("cannot parse {}", args.input.display()))?;

    let lower_y_bound = if args.symmetric_y_gate {
        LowerYBound::FromDeltaY
    } else {
        LowerYBound::FromDeltaX
    };
    let gate = Gate::new(args.time_seek, args.delta_x, args.delta_y, args.delta_d)
        .with_lower_y_bound(lower_y_bound);
    let pipeline = TrackingPipeline::new(
        BandFilter::new(args.y_min, args.y_max),
        gate,
        SummaryConfig {
            min_members: args.min_members,
            min_y_span: args.min_y_span,
        },
    );

    let output = pipeline.run(&records);
    println!(
        "Ran out of points after track {}; {} of {} tracks qualify",
        output.assignments.tracks_opened(),
        output.report.qualifying_count(),
        output.assignments.tracks_opened()
    );

    let report_file = File::create(&args.output)
        .with_context(|| format!("cannot create output file {}", args.output.display()))?;
    let mut writer = BufWriter::new(report_file);
    write_report(
        &mut writer,
        &args.input.display().to_string(),
        pipeline.gate(),
        &output.report,
    )?;
    if args.dump {
        write_detection_dump(&mut writer, &output.detections, &output.assignments)?;
    }
    writer
        .flush()
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "Number of tracks with fits: {}",
        output.report.qualifying_count()
    );
    Ok(())
}
