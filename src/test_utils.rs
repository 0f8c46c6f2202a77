//! Test utilities and fixtures for album-art-finder tests.
//!
//! Provides search response builders, a chunked body reader and small
//! generated images so tests never touch the network.

use std::io::Cursor;

use bytes::Bytes;
use tokio::io::AsyncBufRead;
use tokio_util::io::StreamReader;

/// One `<Item>` in a generated search response.
///
/// `None` fields are left out of the markup entirely.
#[derive(Debug, Clone)]
pub struct FixtureItem {
    pub asin: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub binding: String,
    pub image_url: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl FixtureItem {
    /// A complete audio CD item with a 500x500 image.
    pub fn audio_cd(asin: &str, artist: &str, album: &str) -> Self {
        Self {
            asin: asin.to_string(),
            artist: Some(artist.to_string()),
            album: Some(album.to_string()),
            binding: "Audio CD".to_string(),
            image_url: Some(format!("http://images.example.com/{}.jpg", asin)),
            width: 500,
            height: 500,
        }
    }

    fn to_xml(&self) -> String {
        let esc = |s: &str| quick_xml::escape::escape(s).into_owned();
        let mut xml = String::from("<Item>");
        xml.push_str(&format!("<ASIN>{}</ASIN>", esc(&self.asin)));
        xml.push_str("<SmallImage><URL>http://images.example.com/small.jpg</URL>");
        xml.push_str("<Width Units=\"pixels\">75</Width><Height Units=\"pixels\">75</Height></SmallImage>");
        xml.push_str("<LargeImage>");
        if let Some(url) = &self.image_url {
            xml.push_str(&format!("<URL>{}</URL>", esc(url)));
        }
        xml.push_str(&format!(
            "<Width Units=\"pixels\">{}</Width><Height Units=\"pixels\">{}</Height>",
            self.width, self.height
        ));
        xml.push_str("</LargeImage><ItemAttributes>");
        if let Some(artist) = &self.artist {
            xml.push_str(&format!("<Artist>{}</Artist>", esc(artist)));
        }
        xml.push_str(&format!("<Binding>{}</Binding>", esc(&self.binding)));
        if let Some(album) = &self.album {
            xml.push_str(&format!("<Title>{}</Title>", esc(album)));
        }
        xml.push_str("</ItemAttributes></Item>\n");
        xml
    }
}

/// Build an `ItemSearchResponse` document shaped like the real API's.
pub fn search_response(items: &[FixtureItem]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <ItemSearchResponse xmlns=\"http://webservices.amazon.com/AWSECommerceService/2009-06-01\">\n\
         <OperationRequest><RequestId>test</RequestId></OperationRequest>\n\
         <Items>\n<Request><IsValid>True</IsValid></Request>\n",
    );
    xml.push_str(&format!("<TotalResults>{}</TotalResults>\n", items.len()));
    for item in items {
        xml.push_str(&item.to_xml());
    }
    xml.push_str("</Items>\n</ItemSearchResponse>\n");
    xml
}

/// An async reader that yields `text` in `chunk_size` byte pieces.
pub fn chunked_reader(text: &str, chunk_size: usize) -> impl AsyncBufRead + Send + Unpin + 'static {
    let chunks: Vec<std::io::Result<Bytes>> = text
        .as_bytes()
        .chunks(chunk_size.max(1))
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();
    StreamReader::new(futures::stream::iter(chunks))
}

/// A black PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("Failed to encode test PNG");
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_contains_items() {
        let xml = search_response(&[FixtureItem::audio_cd("B1", "AC/DC", "Back in Black")]);
        assert!(xml.contains("<ASIN>B1</ASIN>"));
        assert!(xml.contains("<Artist>AC/DC</Artist>"));
        assert!(xml.contains("<Width Units=\"pixels\">500</Width>"));
    }

    #[test]
    fn test_missing_fields_omitted() {
        let item = FixtureItem {
            album: None,
            ..FixtureItem::audio_cd("B1", "A", "B")
        };
        assert!(!search_response(&[item]).contains("<Title>"));
    }

    #[test]
    fn test_png_bytes_decode() {
        let data = png_bytes(20, 10);
        let img = image::load_from_memory(&data).unwrap();
        assert_eq!((img.width(), img.height()), (20, 10));
    }
}
