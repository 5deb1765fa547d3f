//! End-to-end scenarios across the buffer, strategy, value, and map layers.

use probemap::{Error, GrowBuffer, ProbeMap, TaggedValue};

/// Ten sequential keys into a capacity-10, load-factor-0.6 map must cross
/// the threshold (0.6 * 10 = 6), forcing at least one resize-and-rehash,
/// after which every key still resolves to its own value.
#[test]
fn ten_keys_force_resize_and_rehash() {
    let keys: Vec<Vec<u8>> = (0..10).map(|i| format!("key{i}").into_bytes()).collect();
    let mut map = ProbeMap::with_capacity(10, 0.6).unwrap();

    for (i, key) in keys.iter().enumerate() {
        map.add(key, TaggedValue::number(i as f64)).unwrap();
    }
    assert!(map.capacity() >= 20, "at least one doubling must have fired");
    assert_eq!(map.len(), 10);

    for (i, key) in keys.iter().enumerate() {
        assert_eq!(
            map.get(key).as_number(),
            Some(i as f64),
            "key{i} lost across resize"
        );
    }
}

/// A heap value stored by address round-trips through the map with its
/// pointer bit pattern intact, and the pointee reads back unchanged while
/// it is still alive.
#[test]
fn heap_payload_stored_by_address() {
    #[derive(PartialEq, Debug)]
    struct Payload {
        scratch: [u8; 8],
        bytes: u64,
    }

    let payload = Box::new(Payload {
        scratch: *b"one\0\0\0\0\0",
        bytes: 0x6f6e65,
    });
    let addr = &*payload as *const Payload as usize;

    let mut map = ProbeMap::with_capacity(10, 0.75).unwrap();
    map.add(b"shell idea 1", TaggedValue::pointer(addr)).unwrap();

    let got = map.get(b"shell idea 1");
    assert!(got.is_pointer());
    assert_eq!(got.as_pointer(), Some(addr));

    // The map stored only the address; reading through it is the caller's
    // contract while the allocation lives.
    let read_back = unsafe { &*(got.as_pointer().unwrap() as *const Payload) };
    assert_eq!(read_back, &*payload);
}

/// Mixed value kinds coexist in one map and decode back to their exact
/// constructors.
#[test]
fn mixed_value_kinds_coexist() {
    let mut map = ProbeMap::with_capacity(16, 0.75).unwrap();
    map.add(b"n", TaggedValue::number(-12.5)).unwrap();
    map.add(b"t", TaggedValue::TRUE).unwrap();
    map.add(b"f", TaggedValue::boolean(false)).unwrap();
    map.add(b"nil", TaggedValue::NIL).unwrap();

    assert_eq!(map.get(b"n").as_number(), Some(-12.5));
    assert_eq!(map.get(b"t").as_bool(), Some(true));
    assert_eq!(map.get(b"f").as_bool(), Some(false));
    // A stored nil and a miss are indistinguishable through get; both are
    // nil words.
    assert!(map.get(b"nil").is_nil());
    assert!(map.get(b"absent").is_nil());
}

/// Delete interleaved with further inserts keeps the survivors reachable
/// through growth and compaction.
#[test]
fn delete_and_insert_interleaved() {
    let keys: Vec<Vec<u8>> = (0..20).map(|i| format!("key{i}").into_bytes()).collect();
    let mut map = ProbeMap::with_capacity(8, 0.6).unwrap();

    for (i, key) in keys.iter().take(10).enumerate() {
        map.add(key, TaggedValue::number(i as f64)).unwrap();
    }
    for key in keys.iter().take(10).step_by(2) {
        assert!(map.delete(key).unwrap());
    }
    for (i, key) in keys.iter().enumerate().skip(10) {
        map.add(key, TaggedValue::number(i as f64)).unwrap();
    }

    for (i, key) in keys.iter().enumerate() {
        let got = map.get(key);
        if i < 10 && i % 2 == 0 {
            assert!(got.is_nil(), "key{i} was deleted");
        } else {
            assert_eq!(got.as_number(), Some(i as f64), "key{i} must survive");
        }
    }
    assert_eq!(map.len(), 15);
}

/// The buffer's concat glues two populated buffers region by region.
#[test]
fn buffer_concat_of_populated_buffers() {
    let mut a: GrowBuffer<u64> = GrowBuffer::with_capacity(4, 1.0).unwrap();
    let mut b: GrowBuffer<u64> = GrowBuffer::with_capacity(3, 0.7).unwrap();
    for i in 0..4 {
        a.set(i, 100 + i as u64).unwrap();
    }
    b.set(0, 200).unwrap();
    b.set(2, 202).unwrap();

    let joined = a.concat(&b).unwrap();
    assert_eq!(joined.capacity(), 7);
    assert_eq!(joined.len(), 6);
    assert_eq!(joined.load_factor(), 0.7);
    for i in 0..4 {
        assert_eq!(joined.get(i), Some(&(100 + i as u64)));
    }
    assert_eq!(joined.get(4), Some(&200));
    assert_eq!(joined.get(5), Some(&0));
    assert_eq!(joined.get(6), Some(&202));
}

/// Construction errors surface as values, not panics.
#[test]
fn constructor_validation() {
    assert_eq!(
        ProbeMap::with_capacity(0, 0.5).err(),
        Some(Error::ZeroCapacity)
    );
    assert!(matches!(
        ProbeMap::with_capacity(8, 0.0).err(),
        Some(Error::InvalidLoadFactor(_))
    ));
    assert!(matches!(
        ProbeMap::with_capacity(8, 1.5).err(),
        Some(Error::InvalidLoadFactor(_))
    ));
}
