mod flate;
mod asciihex;

use std::io::{BufRead, Read};

use crate::base::*;

/// Supported PDF filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// `/FlateDecode`
    Flate,
    /// `/ASCIIHexDecode`
    AsciiHex,
}

impl TryFrom<&Name> for Filter {
    type Error = Error;

    fn try_from(name: &Name) -> Result<Filter, Error> {
        if name == b"FlateDecode" {
            Ok(Filter::Flate)
        } else if name == b"ASCIIHexDecode" {
            Ok(Filter::AsciiHex)
        } else {
            Err(Error::new(ErrorKind::UnsupportedFilter, name.to_string()))
        }
    }
}

/// Converts the value of a `/Filter` key into a list of [`Filter`]s, in the order of application.
pub fn to_filters(obj: &Object) -> Result<Vec<Filter>, Error> {
    let malformed = || Error::new(ErrorKind::UnsupportedFilter, format!("malformed /Filter: {obj}"));
    match &obj.value {
        Value::Name(name) => Ok(vec![name.try_into()?]),
        Value::Array(vec) => vec.iter()
            .map(|item| Filter::try_from(item.as_name().ok_or_else(malformed)?))
            .collect(),
        Value::Null => Ok(vec![]),
        _ => Err(malformed())
    }
}

/// Pairs each filter with its `/DecodeParms` dictionary. The value may be a single dictionary
/// (for a single filter), an array with an entry per filter, or absent.
fn to_params(obj: &Object, count: usize) -> Vec<Option<&Dict>> {
    match &obj.value {
        Value::Array(vec) => (0..count)
            .map(|ix| vec.get(ix).and_then(Object::as_dict))
            .collect(),
        _ => {
            let mut ret = vec![None; count];
            if let Some(first) = ret.first_mut() {
                *first = obj.as_dict();
            }
            ret
        }
    }
}

/// Decodes stream data according to the values of the `/Filter` and `/DecodeParms` entries of its
/// dictionary.
///
/// Both need to be provided as resolved objects (`null` if absent).
pub fn decode_stream(data: &[u8], filter: &Object, params: &Object) -> Result<Vec<u8>, Error> {
    let filters = to_filters(filter)?;
    let params = to_params(params, filters.len());
    decode(data, &filters, &params)
}

/// Applies `filters` in order. `params` holds the decode parameters for each filter; missing
/// entries mean defaults.
pub fn decode(data: &[u8], filters: &[Filter], params: &[Option<&Dict>]) -> Result<Vec<u8>, Error> {
    let mut reader: Box<dyn BufRead + '_> = Box::new(data);
    for (ix, filter) in filters.iter().enumerate() {
        let params = params.get(ix).copied().flatten();
        reader = match filter {
            Filter::Flate => flate::decode(reader, params)?,
            Filter::AsciiHex => Box::new(asciihex::decode(reader)),
        };
    }
    let mut ret = Vec::new();
    reader.read_to_end(&mut ret)
        .map_err(|err| Error::new(ErrorKind::DecodeFailed, err.to_string()))?;
    Ok(ret)
}
