use crate::{
    host::{self, call, failure_values, Method, PipeMethods, Value, METHODS},
    pipe,
    tests::util::*,
    Error, PipeReader, PipeWriter,
};
use color_eyre::eyre::{bail, ensure};

fn expect_bad_argument(result: crate::Result<Vec<Value>>, expected: usize) -> TestResult<String> {
    match ensure_err!(result) {
        Error::InvalidArgument { position, reason } => {
            ensure_eq!(position, expected);
            Ok(reason.into_owned())
        }
        other => bail!("expected an argument error, got {other:?}"),
    }
}

#[test]
fn method_table() -> TestResult {
    install();
    let names = METHODS.iter().map(|m| m.name()).collect::<Vec<_>>();
    ensure_eq!(names, ["read", "write", "close", "is_nonblocking", "set_nonblocking"]);
    for m in METHODS {
        ensure_eq!(Method::from_name(m.name()), Some(m));
    }
    ensure_eq!(Method::from_name("flush"), None);
    Ok(())
}

#[test]
fn round_trip_through_the_table() -> TestResult {
    install();
    let (mut r, mut w) = pipe()?;
    let written = call(&mut w, Method::Write, &["line".into(), Value::Int(42), "\nmore".into()])?;
    ensure!(written.is_empty(), "write returns no values: {written:?}");
    ensure_eq!(call(&mut r, Method::Read, &["l".into()])?, [Value::Bytes(b"line42".to_vec())]);
    ensure_eq!(call(&mut r, Method::Read, &[Value::Int(2)])?, [Value::Bytes(b"mo".to_vec())]);
    ensure_eq!(call(&mut w, Method::Close, &[])?, [Value::Bool(true)]);
    ensure_eq!(call(&mut r, Method::Read, &["*a".into()])?, [Value::Bytes(b"re".to_vec())]);
    Ok(())
}

#[test]
fn oversized_read_count_is_bounded() -> TestResult {
    install();
    let (mut r, mut w) = pipe()?;
    w.write_parts(["short"])?;
    let got = call(&mut r, Method::Read, &[Value::Int(i64::MAX)])?;
    ensure_eq!(got, [Value::Bytes(b"short".to_vec())]);
    Ok(())
}

#[test]
fn nonblocking_methods() -> TestResult {
    install();
    let (mut r, _w) = pipe()?;
    ensure_eq!(call(&mut r, Method::IsNonblocking, &[])?, [Value::Bool(false)]);
    ensure_eq!(call(&mut r, Method::SetNonblocking, &[])?, [Value::Bool(true)], "defaults to true");
    ensure_eq!(call(&mut r, Method::SetNonblocking, &[false.into()])?, [Value::Bool(false)]);
    ensure_eq!(call(&mut r, Method::SetNonblocking, &[Value::Nil])?, [Value::Bool(true)]);
    ensure_eq!(call(&mut r, Method::IsNonblocking, &[])?, [Value::Bool(true)]);
    ensure_eq!(call(&mut r, Method::Read, &["a".into()])?, [Value::Bytes(Vec::new())]);
    Ok(())
}

#[test]
fn argument_errors() -> TestResult {
    install();
    let (mut r, mut w) = pipe()?;
    let reason = expect_bad_argument(call(&mut r, Method::Read, &["x".into()]), 2)?;
    ensure_eq!(reason, "invalid format");
    let reason = expect_bad_argument(call(&mut r, Method::Read, &[Value::Int(-1)]), 2)?;
    ensure_eq!(reason, "byte count must be non-negative");
    let reason = expect_bad_argument(call(&mut r, Method::Read, &[]), 2)?;
    ensure_eq!(reason, "number or string expected");
    let reason = expect_bad_argument(call(&mut r, Method::Read, &[true.into()]), 2)?;
    ensure_eq!(reason, "number or string expected");
    let reason = expect_bad_argument(call(&mut r, Method::SetNonblocking, &[Value::Int(1)]), 2)?;
    ensure_eq!(reason, "boolean expected");

    // A bad part anywhere means nothing is written at all.
    let args = ["fine".into(), "also fine".into(), Value::Bool(true)];
    let reason = expect_bad_argument(call(&mut w, Method::Write, &args), 4)?;
    ensure_eq!(reason, "string expected");
    w.close()?;
    ensure_eq!(r.read_all()?, b"");
    Ok(())
}

#[test]
fn wrong_direction_is_a_bad_descriptor() -> TestResult {
    install();
    let (mut r, mut w) = pipe()?;
    let e = ensure_err!(PipeMethods::write(&mut r, &[&b"x"[..]]));
    ensure!(e.os_code().is_some(), "{e:?}");
    let e = ensure_err!(call(&mut w, Method::Read, &[Value::Int(1)]));
    ensure!(e.os_code().is_some(), "{e:?}");
    Ok(())
}

#[test]
fn table_works_through_trait_objects() -> TestResult {
    install();
    let mut ends = host::pipe()?;
    call(&mut *ends[1], Method::Write, &["via dyn\n".into()])?;
    let line = call(&mut *ends[0], Method::Read, &["L".into()])?;
    ensure_eq!(line, [Value::Bytes(b"via dyn\n".to_vec())]);
    for end in &mut ends {
        ensure_eq!(call(&mut **end, Method::Close, &[])?, [Value::Bool(true)]);
        ensure_eq!(call(&mut **end, Method::Close, &[])?, [Value::Bool(true)]);
    }
    Ok(())
}

#[test]
fn failure_values_for_scripts() -> TestResult {
    install();
    let desc =
        ScriptedDescriptor::reading([data("par"), Err(std::io::Error::from_raw_os_error(7))]);
    let mut r = PipeReader::from_descriptor(desc);
    let e = ensure_err!(call(&mut r, Method::Read, &["l".into()]));
    let values = failure_values(&e);
    ensure_eq!(values[0], Value::Bytes(b"par".to_vec()));
    ensure_eq!(values[2], Value::Int(7));
    ensure!(matches!(&values[1], Value::Bytes(msg) if !msg.is_empty()));

    let values = failure_values(&Error::ShortWrite { part: 0, written: 1, len: 2 });
    ensure_eq!(values[0], Value::Nil);
    ensure_eq!(values[2], Value::Nil);
    Ok(())
}

#[test]
fn scripted_writer_through_the_table() -> TestResult {
    install();
    let desc = ScriptedDescriptor::new();
    let mut w = PipeWriter::from_descriptor(desc.clone());
    call(&mut w, Method::Write, &[Value::Int(-5), "x".into()])?;
    ensure_eq!(desc.script().writes, [b"-5".to_vec(), b"x".to_vec()]);
    Ok(())
}

#[test]
fn mklink_arguments() -> TestResult {
    install();
    let dir = tempfile::tempdir()?;
    let origin = dir.path().join("origin");
    let target = dir.path().join("target");
    std::fs::write(&origin, "x")?;

    let path_value = |p: &std::path::Path| -> TestResult<Value> {
        let s = p.to_str().ok_or_else(|| color_eyre::eyre::eyre!("non-UTF-8 temp path"))?;
        Ok(s.into())
    };
    match ensure_err!(host::mklink(&[path_value(&origin)?, Value::Int(3)])) {
        Error::InvalidArgument { position, .. } => ensure_eq!(position, 2),
        other => bail!("expected an argument error, got {other:?}"),
    }
    match ensure_err!(host::mklink(&[])) {
        Error::InvalidArgument { position, .. } => ensure_eq!(position, 1),
        other => bail!("expected an argument error, got {other:?}"),
    }
    host::mklink(&[path_value(&origin)?, path_value(&target)?, Value::Nil])?;
    ensure_eq!(std::fs::read_to_string(&target)?, "x");
    Ok(())
}

// APFS refuses file names that are not valid UTF-8.
#[cfg(all(unix, not(target_vendor = "apple")))]
#[test]
fn mklink_takes_raw_byte_paths() -> TestResult {
    use std::os::unix::ffi::OsStrExt;
    install();
    let dir = tempfile::tempdir()?;
    let mut origin = dir.path().as_os_str().as_bytes().to_vec();
    origin.extend_from_slice(b"/origin-\xFF\xFE");
    let mut target = dir.path().as_os_str().as_bytes().to_vec();
    target.extend_from_slice(b"/target-\xC3");
    std::fs::write(std::ffi::OsStr::from_bytes(&origin), "raw")?;
    host::mklink(&[Value::Bytes(origin), Value::Bytes(target.clone()), Value::Bool(true)])?;
    let target = std::ffi::OsStr::from_bytes(&target);
    ensure!(std::fs::symlink_metadata(target)?.file_type().is_symlink());
    ensure_eq!(std::fs::read_to_string(target)?, "raw");
    Ok(())
}
