pub mod release_server;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Build a `.tar.gz` release archive with regular files at the given paths.
pub fn tar_gz(files: &[(&str, &str)]) -> Vec<u8> {
    let enc = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(enc);
    for (path, data) in files {
        let data = data.as_bytes();
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, path, data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}
