use crate::commands::album::{ExtractCommand, NormalizeCommand, TocCommand, TracksCommand};
use anyhow::{Context, Result, bail};
use cuebox::album::{AlbumLoader, DEFAULT_SHEET_EXTENSION};
use cuebox::cue::{CueReader, CueWriter};
use cuebox::toc::ctdb_toc_from_container;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Read, Write};

pub fn print_toc(cmd: TocCommand) -> Result<()> {
    let loader = AlbumLoader::default();
    let container = loader.open_container(&cmd.path)?;

    let sheet_name = container
        .enumerate_files_by_extension(DEFAULT_SHEET_EXTENSION)?
        .into_iter()
        .next()
        .with_context(|| format!("No cue sheet found in {}", cmd.path.display()))?;
    let sheet = CueReader::new().parse(&container.read_text(&sheet_name)?);

    let toc = ctdb_toc_from_container(&sheet, container.as_ref())?;
    println!("{toc}");

    Ok(())
}

pub fn list_tracks(cmd: TracksCommand) -> Result<()> {
    let tracks = AlbumLoader::default().load_from(&cmd.path)?;

    if let Some(first) = tracks.first() {
        info!("{} - {}", first.album_performer, first.album_title);
    }

    for track in &tracks {
        let duration = track.duration();
        let missing = if track.track_file_not_found {
            " [file not found]"
        } else {
            ""
        };

        println!(
            "{:02}. {} - {} ({}:{:02}) offset={} length={}{missing}",
            track.track_number,
            track.track_performer,
            track.track_title,
            duration.as_secs() / 60,
            duration.as_secs() % 60,
            track.track_offset,
            track.track_size,
        );
    }

    Ok(())
}

pub fn normalize(cmd: NormalizeCommand) -> Result<()> {
    let sheet = CueReader::new().parse_file(&cmd.input_cue)?;
    let writer = CueWriter::new();

    match cmd.output {
        Some(output) => {
            if output.exists() && !cmd.force {
                bail!("Output file already exists, use --force to overwrite");
            }

            writer.write_file(&sheet, &output)?;
            info!("Wrote {}", output.display());
        }
        None => print!("{}", writer.write(&sheet)),
    }

    Ok(())
}

pub fn extract(pb: MultiProgress, cmd: ExtractCommand) -> Result<()> {
    if cmd.output.exists() && !cmd.force {
        bail!("Output file already exists, use --force to overwrite");
    }

    let tracks = AlbumLoader::default().load_from(&cmd.path)?;
    let track = tracks
        .iter()
        .find(|t| t.track_number == cmd.track)
        .with_context(|| format!("No audio track {:02} in {}", cmd.track, cmd.path.display()))?;

    if track.track_file_not_found {
        bail!("Audio file {} is missing", track.track_file_name);
    }

    debug!(
        "Extracting track {:02} from {} at {} ({} bytes)",
        track.track_number, track.track_file_name, track.track_offset, track.track_size
    );

    let mut input = track.open_stream()?;
    let mut output = BufWriter::new(File::create(&cmd.output)?);

    let bar = pb.add(ProgressBar::new(track.track_size));
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} ({eta})")?
            .progress_chars("=> "),
    );

    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let read = input.read(&mut buffer)?;
        if read == 0 {
            break;
        }

        output.write_all(&buffer[..read])?;
        bar.inc(read as u64);
    }

    output.flush()?;
    bar.finish_and_clear();
    info!("Wrote {} bytes to {}", track.track_size, cmd.output.display());

    Ok(())
}
