use indicatif::{ProgressBar, ProgressStyle};

/// One tick per provider.
pub fn single_pb(length: u64) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [ {bar:50} ] {pos}/{len} {msg} {spinner}")?
            .progress_chars("#|-"),
    );
    Ok(pb)
}
