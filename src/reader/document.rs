use std::path::Path;

use crate::base::*;
use crate::base::types::*;
use crate::codecs;
use crate::config::Config;
use crate::parser::{ByteSource, FileParser};

/// Processing stage of a [`Document`]. Stages only advance; any failure leads to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unloaded,
    HeaderParsed,
    TrailerValidated,
    XRefLocated,
    XRefTableParsed,
    Ready,
    Failed,
}

/// A loaded PDF file.
///
/// After construction, [`Document::process()`] locates the header, checks the `%%EOF` marker,
/// reads the `startxref` offset and the cross-reference table there. Once that succeeded, objects
/// can be read on demand.
///
/// ```
/// use pdfstruct::reader::Document;
/// let doc = Document::from_bytes(b"not a pdf".to_vec()).unwrap();
/// assert!(doc.xref_table().is_err());
/// ```
pub struct Document {
    source: ByteSource,
    config: Config,
    state: State,
    header: Option<Header>,
    xref_offset: Option<Offset>,
    xref: Option<XRefTable>,
    error: Option<Error>,
}

impl Document {
    /// Wraps the complete content of a file. Fails with [`ErrorKind::EmptyInput`] if there is no
    /// data.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        Self::with_config(data, Config::default())
    }

    pub fn with_config(data: Vec<u8>, config: Config) -> Result<Self, Error> {
        let source = ByteSource::load(data)?;
        Ok(Self {
            source,
            config,
            state: State::Unloaded,
            header: None,
            xref_offset: None,
            xref: None,
            error: None,
        })
    }

    /// Reads an entire file. Failures to do so are reported as [`ErrorKind::LoadFailed`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|err| Error::new(ErrorKind::LoadFailed, format!("{}: {err}", path.display())))?;
        log::info!("Loaded {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(data)
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The error that stopped processing, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn source(&self) -> &ByteSource {
        &self.source
    }

    fn parser(&self) -> FileParser<'_> {
        FileParser::with_config(&self.source, self.config.clone())
    }

    /// Runs all remaining processing stages. Stops at the first failure, which is kept and
    /// returned again by any later call.
    pub fn process(&mut self) -> Result<(), Error> {
        loop {
            let next = match self.state {
                State::Ready => return Ok(()),
                State::Failed => return Err(self.error.clone()
                    .unwrap_or_else(|| ErrorKind::NotReady.into())),
                State::Unloaded => self.read_header(),
                State::HeaderParsed => self.parser().validate_eof().map(|()| State::TrailerValidated),
                State::TrailerValidated => self.locate_xref(),
                State::XRefLocated => self.read_xref(),
                State::XRefTableParsed => Ok(State::Ready),
            };
            match next {
                Ok(state) => {
                    log::debug!("{:?} -> {:?}", self.state, state);
                    self.state = state;
                },
                Err(err) => {
                    log::error!("Processing failed in state {:?}: {err}", self.state);
                    self.state = State::Failed;
                    self.error = Some(err.clone());
                    return Err(err);
                }
            }
        }
    }

    fn read_header(&mut self) -> Result<State, Error> {
        let header = self.parser().find_header()?;
        log::info!("PDF version {}", header.version);
        if header.start != 0 {
            log::info!("Offset start @ {}", header.start);
        }
        if header.binary {
            log::info!("Binary marker present");
        }
        self.source.set_start_offset(header.start as usize);
        self.header = Some(header);
        Ok(State::HeaderParsed)
    }

    fn locate_xref(&mut self) -> Result<State, Error> {
        let offset = self.parser().entrypoint()?;
        log::info!("startxref {offset}");
        self.xref_offset = Some(offset);
        Ok(State::XRefLocated)
    }

    fn read_xref(&mut self) -> Result<State, Error> {
        let offset = self.xref_offset.ok_or_else(|| Error::from(ErrorKind::NotReady))?;
        let table = self.parser().read_xref_at(offset)?;
        log::info!("xref table: {} subsections, {} entries",
            table.subsections.len(), table.entries().count());
        self.xref = Some(table);
        Ok(State::XRefTableParsed)
    }

    fn ready(&self) -> Result<&XRefTable, Error> {
        match (self.state, &self.xref) {
            (State::Ready, Some(xref)) => Ok(xref),
            _ => Err(Error::new(ErrorKind::NotReady, format!("state {:?}", self.state)))
        }
    }

    pub fn header(&self) -> Result<&Header, Error> {
        self.ready()?;
        self.header.as_ref().ok_or_else(|| ErrorKind::NotReady.into())
    }

    /// The version token from the header, e.g. `"1.7"`.
    pub fn version(&self) -> Result<&str, Error> {
        Ok(&self.header()?.version)
    }

    pub fn is_binary(&self) -> Result<bool, Error> {
        Ok(self.header()?.binary)
    }

    /// Position of `%PDF` within the file data.
    pub fn start_offset(&self) -> Result<Offset, Error> {
        Ok(self.header()?.start)
    }

    /// The value after `startxref`.
    pub fn xref_offset(&self) -> Result<Offset, Error> {
        self.ready()?;
        self.xref_offset.ok_or_else(|| ErrorKind::NotReady.into())
    }

    pub fn xref_table(&self) -> Result<&XRefTable, Error> {
        self.ready()
    }

    /// The trailer dictionary, if the table was followed by one.
    pub fn trailer(&self) -> Result<Option<&Dict>, Error> {
        Ok(self.ready()?.trailer.as_ref())
    }

    /// Parses a bare object at `offset` (relative to `%PDF`).
    pub fn parse_object_at(&self, offset: Offset) -> Result<Object, Error> {
        self.ready()?;
        self.parser().read_obj_at(offset, &LengthResolver(self))
    }

    /// The byte offset of an object number according to the cross-reference table. `None` for free
    /// entries and numbers not covered by the table.
    pub fn object_offset(&self, num: ObjNum) -> Result<Option<Offset>, Error> {
        Ok(match self.ready()?.entry(num).map(XRefEntry::record) {
            Some(Record::Used { offset, .. }) => Some(offset),
            _ => None
        })
    }

    /// Reads the object with a given number, using the generation number from the table. Free or
    /// unknown object numbers give `null`.
    pub fn resolve(&self, num: ObjNum) -> Result<Object, Error> {
        match self.ready()?.entry(num).map(XRefEntry::record) {
            Some(Record::Used { gen, offset }) => self.read_indirect(offset, &ObjRef { num, gen }, &LengthResolver(self)),
            _ => Ok(NULL_OBJECT.clone())
        }
    }

    /// Reads the object referred to by `objref`. Free or unknown references, as well as those with
    /// a generation number differing from the table, give `null`.
    pub fn resolve_ref(&self, objref: &ObjRef) -> Result<Object, Error> {
        match self.ready()?.locate(objref) {
            Some(Record::Used { offset, .. }) => self.read_indirect(offset, objref, &LengthResolver(self)),
            _ => Ok(NULL_OBJECT.clone())
        }
    }

    fn read_indirect(&self, offset: Offset, expected: &ObjRef, resolver: &dyn Resolver) -> Result<Object, Error> {
        let (objref, obj) = self.parser().read_indirect_at(offset, resolver)?;
        if &objref == expected {
            Ok(obj)
        } else {
            Err(Error::new(ErrorKind::ObjectNumberMismatch,
                format!("expected {expected}, found {objref} at offset {offset}")))
        }
    }

    /// All in-use objects in the order of the cross-reference table, each with its parse result.
    pub fn objects(&self) -> Result<impl Iterator<Item = (ObjRef, Result<Object, Error>)> + '_, Error> {
        Ok(self.ready()?.entries()
            .filter_map(move |entry| match entry.record() {
                Record::Used { gen, offset } => {
                    let objref = ObjRef { num: entry.num, gen };
                    Some((objref, self.read_indirect(offset, &objref, &LengthResolver(self))))
                },
                Record::Free { .. } => None
            }))
    }

    /// The source bytes occupied by a [`Span`].
    pub fn raw_bytes(&self, span: Span) -> Result<&[u8], Error> {
        self.ready()?;
        if span.start > span.end {
            return Err(Error::new(ErrorKind::OutOfRange, format!("inverted span {}..{}", span.start, span.end)));
        }
        if span.is_empty() {
            return Ok(&[]);
        }
        self.source.read_offset_range(span.start, Some(span.end - 1))
    }

    /// The raw (encoded) data of a stream.
    pub fn stream_data(&self, stm: &Stream) -> Result<&[u8], Error> {
        self.raw_bytes(stm.data)
    }

    /// The data of a stream after applying its filters. `/Filter` and `/DecodeParms` may be
    /// indirect.
    pub fn decoded_stream_data(&self, stm: &Stream) -> Result<Vec<u8>, Error> {
        let data = self.stream_data(stm)?;
        let filter = self.resolve_obj(stm.dict.lookup(b"Filter").clone())?;
        let params = self.resolve_obj(stm.dict.lookup(b"DecodeParms").clone())?;
        codecs::decode_stream(data, &filter, &params)
    }
}

impl Resolver for Document {
    fn resolve_ref(&self, objref: &ObjRef) -> Result<Object, Error> {
        Document::resolve_ref(self, objref)
    }
}

/// Resolves `/Length` of streams. The target is read without resolving further references, so a
/// stream whose length refers back to itself cannot recurse.
struct LengthResolver<'a>(&'a Document);

impl Resolver for LengthResolver<'_> {
    fn resolve_ref(&self, objref: &ObjRef) -> Result<Object, Error> {
        match self.0.ready()?.locate(objref) {
            Some(Record::Used { offset, .. }) => self.0.read_indirect(offset, objref, &()),
            _ => Ok(NULL_OBJECT.clone())
        }
    }
}
