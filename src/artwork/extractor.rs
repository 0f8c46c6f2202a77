//! Incremental extraction of candidate items from a search response.
//!
//! [`ItemStreamExtractor`] is a plain state machine: it is told when elements
//! open and close and what character data they carry, and keeps only the
//! current element path plus the item being assembled. [`extract_items`]
//! drives it from a `quick-xml` reader over any async byte source, so the
//! response is parsed as chunks arrive and never held as a whole document.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tokio::io::AsyncBufRead;

use super::domain::{ArtworkError, CandidateItem};

/// Opening this element starts a new item.
const ITEM_BOUNDARY: &[&str] = &["ItemSearchResponse", "Items", "Item", "ASIN"];

/// Binding value that marks an item as an audio CD
pub const AUDIO_FORMAT_LABEL: &str = "Audio CD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ImageUrl,
    ImageWidth,
    ImageHeight,
    Artist,
    Album,
    Binding,
}

const FIELD_PATHS: &[(&[&str], Field)] = &[
    (
        &["ItemSearchResponse", "Items", "Item", "LargeImage", "URL"],
        Field::ImageUrl,
    ),
    (
        &["ItemSearchResponse", "Items", "Item", "LargeImage", "Width"],
        Field::ImageWidth,
    ),
    (
        &["ItemSearchResponse", "Items", "Item", "LargeImage", "Height"],
        Field::ImageHeight,
    ),
    (
        &["ItemSearchResponse", "Items", "Item", "ItemAttributes", "Artist"],
        Field::Artist,
    ),
    (
        &["ItemSearchResponse", "Items", "Item", "ItemAttributes", "Title"],
        Field::Album,
    ),
    (
        &["ItemSearchResponse", "Items", "Item", "ItemAttributes", "Binding"],
        Field::Binding,
    ),
];

/// Fields seen so far for the item being parsed.
#[derive(Debug, Default)]
struct PartialItem {
    artist: Option<String>,
    album: Option<String>,
    image_url: Option<String>,
    image_width: Option<u32>,
    image_height: Option<u32>,
    is_audio_cd: bool,
}

impl PartialItem {
    /// Complete, audio CD, and an image at least `min_width` x `min_height`.
    fn validate(self, min_width: u32, min_height: u32) -> Option<CandidateItem> {
        if !self.is_audio_cd {
            return None;
        }
        let candidate = CandidateItem {
            artist: self.artist?,
            album: self.album?,
            image_url: self.image_url?,
            image_width: self.image_width?,
            image_height: self.image_height?,
        };
        (candidate.image_width >= min_width && candidate.image_height >= min_height)
            .then_some(candidate)
    }
}

/// Element-path state machine collecting validated items.
#[derive(Debug)]
pub struct ItemStreamExtractor {
    path: Vec<String>,
    /// `None` until the open element receives character data.
    text: Option<String>,
    current: PartialItem,
    finished: Vec<CandidateItem>,
    min_width: u32,
    min_height: u32,
}

impl ItemStreamExtractor {
    /// Items whose image is smaller than `min_width` x `min_height` are dropped.
    pub fn new(min_width: u32, min_height: u32) -> Self {
        Self {
            path: Vec::new(),
            text: None,
            current: PartialItem::default(),
            finished: Vec::new(),
            min_width,
            min_height,
        }
    }

    pub fn open_element(&mut self, name: &str) {
        self.path.push(name.to_string());
        self.text = None;

        if self.path == ITEM_BOUNDARY {
            self.flush();
        }
    }

    /// Character data may arrive in several pieces per element.
    pub fn text(&mut self, data: &str) {
        self.text.get_or_insert_with(String::new).push_str(data);
    }

    pub fn close_element(&mut self, name: &str) -> Result<(), ArtworkError> {
        match self.path.last() {
            Some(open) if open == name => {}
            Some(open) => {
                return Err(ArtworkError::MalformedResponse(format!(
                    "expected </{}>, found </{}>",
                    open, name
                )));
            }
            None => {
                return Err(ArtworkError::MalformedResponse(format!(
                    "unexpected </{}>",
                    name
                )));
            }
        }

        // An element without character data leaves its field unset.
        if let (Some(field), Some(value)) = (self.current_field(), self.text.take()) {
            self.assign(field, &value)?;
        }

        self.path.pop();
        self.text = None;
        Ok(())
    }

    /// Flush the last item and return everything that validated.
    pub fn finish(mut self) -> Result<Vec<CandidateItem>, ArtworkError> {
        if let Some(open) = self.path.last() {
            return Err(ArtworkError::MalformedResponse(format!(
                "document ended inside <{}>",
                open
            )));
        }
        self.flush();
        Ok(self.finished)
    }

    fn flush(&mut self) {
        let item = std::mem::take(&mut self.current);
        if let Some(candidate) = item.validate(self.min_width, self.min_height) {
            self.finished.push(candidate);
        }
    }

    fn current_field(&self) -> Option<Field> {
        FIELD_PATHS
            .iter()
            .find(|(path, _)| self.path == *path)
            .map(|(_, field)| *field)
    }

    fn assign(&mut self, field: Field, value: &str) -> Result<(), ArtworkError> {
        let value = value.trim();
        match field {
            Field::ImageUrl => self.current.image_url = Some(value.to_string()),
            Field::ImageWidth => self.current.image_width = Some(parse_dimension("Width", value)?),
            Field::ImageHeight => {
                self.current.image_height = Some(parse_dimension("Height", value)?)
            }
            Field::Artist => self.current.artist = Some(value.to_string()),
            Field::Album => self.current.album = Some(value.to_string()),
            Field::Binding => {
                if value == AUDIO_FORMAT_LABEL {
                    self.current.is_audio_cd = true;
                }
            }
        }
        Ok(())
    }
}

fn parse_dimension(name: &str, value: &str) -> Result<u32, ArtworkError> {
    value.parse().map_err(|_| {
        ArtworkError::MalformedResponse(format!("image {} is not an integer: {:?}", name, value))
    })
}

/// Parse a search response from `reader`, returning the validated items.
///
/// Any markup error fails the whole response; no partial list is returned.
pub async fn extract_items<R>(
    reader: R,
    min_width: u32,
    min_height: u32,
) -> Result<Vec<CandidateItem>, ArtworkError>
where
    R: AsyncBufRead + Unpin,
{
    let mut xml = Reader::from_reader(reader);
    let mut extractor = ItemStreamExtractor::new(min_width, min_height);
    let mut buf = Vec::new();

    loop {
        let event = xml.read_event_into_async(&mut buf).await.map_err(|e| {
            ArtworkError::MalformedResponse(format!(
                "XML error at byte {}: {}",
                xml.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => extractor.open_element(&element_name(e.local_name().as_ref())?),
            Event::Empty(e) => {
                let name = element_name(e.local_name().as_ref())?;
                extractor.open_element(&name);
                extractor.close_element(&name)?;
            }
            Event::End(e) => extractor.close_element(&element_name(e.local_name().as_ref())?)?,
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|e| ArtworkError::MalformedResponse(e.to_string()))?;
                extractor.text(&text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|e| ArtworkError::MalformedResponse(e.to_string()))?;
                extractor.text(text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    extractor.finish()
}

fn element_name(raw: &[u8]) -> Result<String, ArtworkError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| ArtworkError::MalformedResponse(format!("element name: {}", e)))
}
