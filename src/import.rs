use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::event::Event;

use anyhow::{anyhow, Context, Result};
use log::debug;

/// Import the events in `filename`
///
/// The file contains either a JSON array of events or a sequence of JSON
/// events, typically one per line.
pub fn import(filename: &Path, events: &mut Vec<Event>) -> Result<()> {
    let file = File::open(filename)
        .with_context(|| format!("Failed to open {:?}", filename))?;
    import_from(BufReader::new(file), events)
        .with_context(|| format!("Failed to import {:?}", filename))
}

pub fn import_from<R: BufRead>(mut reader: R, events: &mut Vec<Event>) -> Result<()> {
    match first_non_blank(&mut reader)? {
        Some(b'[') => {
            debug!("importing JSON array of events");
            let imported: Vec<Event> = serde_json::from_reader(reader)?;
            events.extend(imported);
            Ok(())
        }
        Some(b'{') => {
            debug!("importing JSON event stream");
            import_stream(reader, events)
        }
        Some(_) => Err(anyhow!("Unknown file format")),
        None => Ok(()),
    }
}

fn import_stream<R: BufRead>(reader: R, events: &mut Vec<Event>) -> Result<()> {
    let stream = serde_json::Deserializer::from_reader(reader).into_iter::<Event>();
    for (n, event) in stream.enumerate() {
        let event = event.with_context(|| format!("Error reading event {n}"))?;
        events.push(event);
    }
    Ok(())
}

/// Skip leading whitespace and peek at the next byte
fn first_non_blank<R: BufRead>(reader: &mut R) -> std::io::Result<Option<u8>> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(None);
        }
        if let Some(pos) = buf.iter().position(|b| !b.is_ascii_whitespace()) {
            let first = buf[pos];
            reader.consume(pos);
            return Ok(Some(first));
        }
        let len = buf.len();
        reader.consume(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_tag::InputTag;
    use crate::reco::Met;

    const EVENT: &str = r#"{"id": 1, "collections": {"hltPFMETProducer": {"type": "mets", "data": [{"pt": 12.5, "phi": 0.5}]}}}"#;

    #[test]
    fn json_array() {
        let input = format!("\n  [{EVENT}, {{\"id\": 2}}]");
        let mut events = Vec::new();
        import_from(input.as_bytes(), &mut events).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id, 2);

        let mets: &Vec<Met> = events[0].get(&InputTag::new("hltPFMETProducer")).unwrap();
        assert_eq!(mets[0].pt, 12.5);
    }

    #[test]
    fn json_lines() {
        let input = format!("{EVENT}\n{{\"id\": 2}}\n{{\"id\": 3}}\n");
        let mut events = Vec::new();
        import_from(input.as_bytes(), &mut events).unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn empty_and_malformed() {
        let mut events = Vec::new();
        import_from(" \n".as_bytes(), &mut events).unwrap();
        assert!(events.is_empty());

        assert!(import_from("<LesHouchesEvents".as_bytes(), &mut events).is_err());
        assert!(import_from("{\"id\": 1}\n{\"id\": ".as_bytes(), &mut events).is_err());
    }
}
