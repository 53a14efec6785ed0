//! Behavioural tests for the `favorite_detail` decoder against
//! fixture-built buffers.
//!
//! Covers the decoding contract end to end:
//!
//! - whole buffers decode to every entry, in order;
//! - an empty buffer and a short (< 9 byte) tail both end cleanly;
//! - wrong tag bytes and overlong lengths fail the whole buffer.

use sns_tests::{ENTRY_HEADER, favorite_detail, push_favorite};
use sns_types::favorite::{ENTRY_HEADER_LEN, ENTRY_TRAILER_LEN};
use sns_types::{FavoriteEntry, FavoriteError, decode_favorite_list};

fn entry(name: &str, wxid: &str) -> FavoriteEntry {
    FavoriteEntry {
        display_name: name.to_string(),
        user_identifier: wxid.to_string(),
    }
}

// ── Well-formed buffers ───────────────────────────────────────────────────────

#[test]
fn alice_and_bob() {
    let buf = favorite_detail(&[("Alice", "wxid_alice"), ("Bob", "wxid_bob")]);
    assert_eq!(
        decode_favorite_list(&buf).unwrap(),
        vec![entry("Alice", "wxid_alice"), entry("Bob", "wxid_bob")]
    );
}

#[test]
fn n_entries_decode_to_n_in_order() {
    let pairs: Vec<(String, String)> = (0..25)
        .map(|i| (format!("user {i}"), format!("wxid_{i:03}")))
        .collect();
    let refs: Vec<(&str, &str)> = pairs.iter().map(|(n, w)| (n.as_str(), w.as_str())).collect();

    let decoded = decode_favorite_list(&favorite_detail(&refs)).unwrap();
    assert_eq!(decoded.len(), 25);
    for (i, e) in decoded.iter().enumerate() {
        assert_eq!(e.display_name, format!("user {i}"));
        assert_eq!(e.user_identifier, format!("wxid_{i:03}"));
    }
}

#[test]
fn empty_buffer() {
    assert_eq!(decode_favorite_list(&[]).unwrap(), Vec::<FavoriteEntry>::new());
}

#[test]
fn longest_single_byte_lengths() {
    let name = "n".repeat(255);
    let wxid = "w".repeat(255);
    let buf = favorite_detail(&[(name.as_str(), wxid.as_str())]);
    assert_eq!(decode_favorite_list(&buf).unwrap(), vec![entry(&name, &wxid)]);
}

#[test]
fn decoding_is_deterministic() {
    let buf = favorite_detail(&[("Bob", "wxid_bob"), ("Alice", "wxid_alice"), ("Bob", "wxid_bob")]);
    let first = decode_favorite_list(&buf).unwrap();
    let second = decode_favorite_list(&buf).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

// ── Tolerated tails ───────────────────────────────────────────────────────────

#[test]
fn trailing_bytes_shorter_than_header() {
    for extra in 1..ENTRY_HEADER_LEN {
        let mut buf = favorite_detail(&[("Alice", "wxid_alice"), ("Bob", "wxid_bob")]);
        buf.extend_from_slice(&ENTRY_HEADER[..extra]);
        let decoded = decode_favorite_list(&buf)
            .unwrap_or_else(|e| panic!("{extra} trailing bytes should decode: {e}"));
        assert_eq!(decoded.len(), 2, "{extra} trailing bytes");
    }
}

#[test]
fn last_trailer_cut_short() {
    let full = favorite_detail(&[("Alice", "wxid_alice"), ("Bob", "wxid_bob")]);
    for cut in 1..=ENTRY_TRAILER_LEN {
        let buf = &full[..full.len() - cut];
        assert_eq!(
            decode_favorite_list(buf).unwrap(),
            vec![entry("Alice", "wxid_alice"), entry("Bob", "wxid_bob")],
            "trailer cut by {cut}"
        );
    }
}

// ── Malformed buffers ─────────────────────────────────────────────────────────

#[test]
fn first_tag_wrong_before_any_entry() {
    let mut buf = favorite_detail(&[("Alice", "wxid_alice")]);
    buf[ENTRY_HEADER_LEN] = 0x1a;
    assert_eq!(
        decode_favorite_list(&buf),
        Err(FavoriteError::MalformedTag {
            offset: ENTRY_HEADER_LEN,
            expected: 0x22,
            found: 0x1a
        })
    );
}

#[test]
fn second_tag_wrong() {
    let mut buf = favorite_detail(&[("Bob", "wxid_bob")]);
    let offset = ENTRY_HEADER_LEN + 2 + "Bob".len();
    buf[offset] = 0x12;
    assert_eq!(
        decode_favorite_list(&buf),
        Err(FavoriteError::MalformedTag {
            offset,
            expected: 0x1a,
            found: 0x12
        })
    );
}

#[test]
fn name_length_overruns_buffer() {
    let mut buf = ENTRY_HEADER.to_vec();
    buf.extend_from_slice(&[0x22, 200]);
    buf.extend_from_slice(b"short");
    assert_eq!(
        decode_favorite_list(&buf),
        Err(FavoriteError::TruncatedField {
            offset: ENTRY_HEADER_LEN + 2,
            needed: 200,
            remaining: 5
        })
    );
}

#[test]
fn wxid_length_overruns_buffer() {
    let mut buf = ENTRY_HEADER.to_vec();
    buf.extend_from_slice(&[0x22, 1, b'A', 0x1a, 30]);
    buf.extend_from_slice(b"wxid");
    assert!(matches!(
        decode_favorite_list(&buf),
        Err(FavoriteError::TruncatedField { needed: 30, remaining: 4, .. })
    ));
}

#[test]
fn cut_inside_second_entry_fails_whole_buffer() {
    let mut buf = favorite_detail(&[("Alice", "wxid_alice")]);
    let mut second = Vec::new();
    push_favorite(&mut second, "Bob", "wxid_bob");
    // header, name tag and length, then stop mid-name
    buf.extend_from_slice(&second[..ENTRY_HEADER_LEN + 3]);
    assert!(matches!(
        decode_favorite_list(&buf),
        Err(FavoriteError::TruncatedField { .. })
    ));
}

#[test]
fn errors_name_their_offset() {
    let mut buf = favorite_detail(&[("Alice", "wxid_alice")]);
    buf[ENTRY_HEADER_LEN] = 0x00;
    let message = decode_favorite_list(&buf).unwrap_err().to_string();
    assert_eq!(message, "malformed tag at offset 9: expected 0x22, found 0x00");
}
