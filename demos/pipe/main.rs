use pipelink::{pipe, ReadMode};
use std::thread;

fn main() -> pipelink::Result<()> {
    let (mut reader, mut writer) = pipe()?;

    let jh = thread::spawn(move || -> pipelink::Result<()> {
        writer.write_parts(["Hello", " from the other side!\n"])?.write_parts(["Bye."])?;
        // Dropping the writer would close it too, this just reports close errors.
        writer.close()
    });

    let greeting = reader.read_with(ReadMode::Line { chop: true })?;
    assert_eq!(greeting, b"Hello from the other side!");

    jh.join().expect("writer thread panicked")?;
    let rest = reader.read_all()?;
    assert_eq!(rest, b"Bye.");
    Ok(())
}
