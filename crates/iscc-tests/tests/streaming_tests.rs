//! Streaming hasher and ISCC-SUM tests over files.

use std::fs::File;
use std::io::{self, Write};

use iscc_gen::{
    gen_data_code, gen_instance_code, gen_sum_code, DataHasher, GenConfig, HasherState,
    InstanceHasher,
};
use iscc_tests::fixtures::lcg_data;
use iscc_tests::vectors::*;
use tempfile::NamedTempFile;

fn temp_file_with(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

/// ISCC-SUM over a file equals the one-shot generators over its bytes.
#[test]
fn test_sum_code_from_file() {
    let data = lcg_data(100_000);
    let file = temp_file_with(&data);

    for buffer_size in [1, 1000, 65_536, 1 << 21] {
        let config = GenConfig::new(128).with_buffer_size(buffer_size);
        let sum = gen_sum_code(File::open(file.path()).unwrap(), &config).unwrap();
        assert_eq!(sum.units[0], gen_data_code(&data, 128).unwrap().iscc);
        assert_eq!(sum.units[1], gen_instance_code(&data, 128).unwrap().iscc);
        assert_eq!(sum.filesize, 100_000);
    }
}

/// ISCC-SUM of an empty file.
#[test]
fn test_sum_code_empty_file() {
    let file = temp_file_with(b"");
    let sum = gen_sum_code(File::open(file.path()).unwrap(), &GenConfig::default()).unwrap();
    assert_eq!(sum.units, vec![DATA_EMPTY, INSTANCE_EMPTY]);
    assert_eq!(sum.datahash, DATAHASH_EMPTY);
}

/// Hashers copied into with `io::copy` match the one-shot results.
#[test]
fn test_hashers_with_io_copy() {
    let data = lcg_data(70_000);
    let file = temp_file_with(&data);

    let mut data_hasher = DataHasher::new();
    io::copy(&mut File::open(file.path()).unwrap(), &mut data_hasher).unwrap();
    let mut instance_hasher = InstanceHasher::new();
    io::copy(&mut File::open(file.path()).unwrap(), &mut instance_hasher).unwrap();

    assert_eq!(data_hasher.finalize(256).unwrap(), gen_data_code(&data, 256).unwrap());
    assert_eq!(
        instance_hasher.finalize(256).unwrap(),
        gen_instance_code(&data, 256).unwrap()
    );
    assert_eq!(data_hasher.state(), HasherState::Finalized);
    assert_eq!(instance_hasher.state(), HasherState::Finalized);
}

/// Hashers can be moved to another thread.
#[test]
fn test_hasher_moves_across_threads() {
    let data = lcg_data(30_000);
    let mut hasher = DataHasher::new();
    hasher.update(&data[..10_000]).unwrap();

    let rest = data[10_000..].to_vec();
    let code = std::thread::spawn(move || {
        hasher.update(&rest).unwrap();
        hasher.finalize(64).unwrap()
    })
    .join()
    .unwrap();
    assert_eq!(code, gen_data_code(&data, 64).unwrap());
}
