//! Interactive session loop
//!
//! One gallery, one caller: commands are read line by line and dispatched
//! against the shared cursor. The target sink is rendered to stdout.

use anyhow::Result;
use gallery_core::{
    DataUrlEncoder, Gallery, GalleryConfig, GalleryError, ImageSlot, ImageUpload, NavOutcome,
    SaveOutcome,
};
use gallery_store::FileKvStore;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  add <file>      save an image into the gallery
  preview <file>  show an image without saving it
  show            show the first image
  next            show the next image
  prev            show the previous image
  list            list stored filenames
  help            print this help
  quit            exit";

/// Session state for the command loop
struct App {
    gallery: Gallery<FileKvStore>,
    slot: ImageSlot,
}

/// Run the interactive session
pub async fn run(config: &GalleryConfig) -> Result<()> {
    let store = FileKvStore::open(config.store_path())?;
    tracing::info!("Gallery store at {:?}", store.path());

    let mut app = App {
        gallery: Gallery::new(store, DataUrlEncoder::new()),
        slot: ImageSlot::new(),
    };

    println!("PocketGallery. Type 'help' for commands.");

    // Mirror the page-load behavior: show the first stored image, if any
    app.gallery.show_default(&mut app.slot)?;
    app.render_slot();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(word) => word,
            None => continue,
        };
        let argument = parts.next();

        let result = app.dispatch(command, argument).await;
        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_recoverable() => println!("{}", e.user_message()),
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Session ended");
    Ok(())
}

impl App {
    /// Handle one command. Returns `Ok(false)` to end the session.
    async fn dispatch(&mut self, command: &str, argument: Option<&str>) -> Result<bool, GalleryError> {
        match command {
            "add" => {
                let selection = load_selection(argument).await?;
                let outcome = self.gallery.save_image(selection).await?;
                self.report_message();
                if outcome == SaveOutcome::Saved {
                    tracing::debug!("Save completed");
                }
            }
            "preview" => {
                let selection = load_selection(argument).await?;
                if self.gallery.preview(selection, &mut self.slot).await? {
                    self.render_slot();
                } else {
                    self.report_message();
                }
            }
            "show" => {
                self.gallery.show_default(&mut self.slot)?;
                self.render_slot();
            }
            "next" => {
                self.navigate(|gallery, slot| gallery.show_next(slot))?;
            }
            "prev" => {
                self.navigate(|gallery, slot| gallery.show_previous(slot))?;
            }
            "list" => {
                let filenames = self.gallery.filenames()?;
                if filenames.is_empty() {
                    println!("(empty gallery)");
                }
                for (index, filename) in filenames.iter().enumerate() {
                    println!("{:>3}  {}", index, filename);
                }
            }
            "help" => println!("{}", HELP),
            "quit" | "exit" => return Ok(false),
            other => println!("Unknown command: {} (try 'help')", other),
        }

        Ok(true)
    }

    fn navigate<F>(&mut self, op: F) -> Result<(), GalleryError>
    where
        F: FnOnce(&mut Gallery<FileKvStore>, &mut ImageSlot) -> Result<NavOutcome, GalleryError>,
    {
        match op(&mut self.gallery, &mut self.slot)? {
            NavOutcome::Shown => self.render_slot(),
            NavOutcome::NoImage => self.report_message(),
        }
        Ok(())
    }

    /// Print the target sink's current content
    fn render_slot(&self) {
        if let Some(source) = self.slot.source() {
            let head: String = source.chars().take(48).collect();
            println!("[image] {}... ({} chars)", head, source.len());
        }
    }

    fn report_message(&self) {
        if let Some(message) = self.gallery.message() {
            println!("{}", message);
        }
    }
}

/// Turn a path argument into an upload, reading the file's bytes.
/// A missing argument is a missing selection, not an error.
async fn load_selection(argument: Option<&str>) -> Result<Option<ImageUpload>, GalleryError> {
    let Some(path) = argument else {
        return Ok(None);
    };

    let filename = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string();
    let bytes = tokio::fs::read(path).await?;

    Ok(Some(ImageUpload { filename, bytes }))
}
