use super::super::{Error, OpResult};
use cozo::{DataValue, NamedRows, Num};

pub fn op_result(result: std::result::Result<NamedRows, miette::Report>) -> OpResult {
    use itertools::Itertools;
    let result = result.map_err(Error::EngineError)?;

    let headers = result.headers.iter().map(String::as_str).collect_vec();
    let rows = result.rows.iter().map(Vec::as_slice).collect_vec();

    match (&headers[..], &rows[..]) {
        (["status"], [[v]]) if v == &DataValue::from("OK") => Ok(()),
        _ => Err(Error::ResultError(result)),
    }
}

// system ops such as `::columns` fail in the engine when the relation is missing
pub fn exists_result(result: std::result::Result<NamedRows, miette::Report>) -> OpResult {
    result.map(|_| ()).map_err(Error::EngineError)
}

pub fn nullable_str(value: Option<String>) -> DataValue {
    value.map(DataValue::from).unwrap_or(DataValue::Null)
}

pub fn nullable_int(value: Option<i64>) -> DataValue {
    value.map(DataValue::from).unwrap_or(DataValue::Null)
}

// outer None means the value has an unexpected type
pub fn opt_str(value: &DataValue) -> Option<Option<String>> {
    match value {
        DataValue::Null => Some(None),
        DataValue::Str(s) => Some(Some(s.to_string())),
        _ => None,
    }
}

pub fn opt_int(value: &DataValue) -> Option<Option<i64>> {
    match value {
        DataValue::Null => Some(None),
        DataValue::Num(Num::Int(i)) => Some(Some(*i)),
        _ => None,
    }
}
