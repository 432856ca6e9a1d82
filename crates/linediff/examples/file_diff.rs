use std::env;
use std::time::Duration;

use anyhow::{bail, Result};
use linediff::{compare_files, DiffEngine, DiffOptions};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [old_path, new_path] = args.as_slice() else {
        bail!("usage: file_diff <old> <new>");
    };

    let options = DiffOptions::default().max_computation_time(Duration::from_secs(2));
    let engine = DiffEngine::new(options)?;
    let diff = compare_files(old_path, new_path, &engine)?;

    if diff.result().timed_out {
        eprintln!("warning: diff took too long, the result may not be minimal");
    }
    print!("{}", diff.unified_diff(3));

    Ok(())
}
