//! Built-in `X-Bogus` token generation.
//!
//! Mirrors the web client's signing routine: MD5 digests of the URL, an empty
//! body and the RC4-scrambled user agent are folded together with a timestamp
//! into a 19 byte payload, which is RC4-scrambled again and encoded with a
//! shuffled base64 alphabet. The result is always 28 characters.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use md5::{Digest, Md5};

use crate::api::signer::Signer;
use crate::error::Result;

/// Hex MD5 of an empty request body, hashed as text.
const EMPTY_BODY_DIGEST: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// RC4 key applied to the user agent.
const USER_AGENT_KEY: [u8; 3] = [0, 1, 12];

/// RC4 key applied to the final payload.
const PAYLOAD_KEY: [u8; 1] = [255];

/// Fixed canvas fingerprint reported by the web client.
const CANVAS_FINGERPRINT: u32 = 536_919_696;

const STANDARD_ALPHABET: &[u8; 65] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

const TOKEN_ALPHABET: &[u8; 65] =
    b"Dkdpgh4ZKsQB80/Mfvw36XI1R25-WUAlEi7NLboqYTOPuzmFjJnryx9HVGcaStCe=";

/// In-process signer, no external runtime required.
#[derive(Debug, Clone, Copy, Default)]
pub struct XBogusSigner;

impl XBogusSigner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Signer for XBogusSigner {
    async fn sign(&self, query: &str, user_agent: &str) -> Result<String> {
        Ok(x_bogus(query, user_agent, unix_seconds()))
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

/// Compute the token for `url` and `user_agent` at `timestamp` (unix seconds).
pub fn x_bogus(url: &str, user_agent: &str, timestamp: u32) -> String {
    let url_digest = double_md5(url.as_bytes());
    let body_digest = double_md5(EMPTY_BODY_DIGEST.as_bytes());

    let scrambled_ua = rc4(&USER_AGENT_KEY, user_agent.as_bytes());
    let ua_digest = md5(encode(&scrambled_ua, STANDARD_ALPHABET).as_bytes());

    let mut payload = vec![
        64,
        0,
        1,
        12,
        url_digest[14],
        url_digest[15],
        body_digest[14],
        body_digest[15],
        ua_digest[14],
        ua_digest[15],
    ];
    payload.extend_from_slice(&timestamp.to_be_bytes());
    payload.extend_from_slice(&CANVAS_FINGERPRINT.to_be_bytes());
    let checksum = payload.iter().fold(0u8, |acc, b| acc ^ b);
    payload.push(checksum);

    let mut framed = vec![2, 255];
    framed.extend(rc4(&PAYLOAD_KEY, &payload));

    encode(&framed, TOKEN_ALPHABET)
}

fn md5(data: &[u8]) -> [u8; 16] {
    Md5::digest(data).into()
}

fn double_md5(data: &[u8]) -> [u8; 16] {
    md5(&md5(data))
}

/// RC4 keystream XOR.
fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut state: Vec<u8> = (0..=255).collect();
    let mut j = 0usize;
    for i in 0..256 {
        j = (j + state[i] as usize + key[i % key.len()] as usize) % 256;
        state.swap(i, j);
    }

    let (mut i, mut j) = (0usize, 0usize);
    data.iter()
        .map(|byte| {
            i = (i + 1) % 256;
            j = (j + state[i] as usize) % 256;
            state.swap(i, j);
            byte ^ state[(state[i] as usize + state[j] as usize) % 256]
        })
        .collect()
}

/// Base64 with a caller supplied alphabet; index 64 is the padding character.
fn encode(data: &[u8], alphabet: &[u8; 65]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let n = (chunk[0] as u32) << 16
            | (*chunk.get(1).unwrap_or(&0) as u32) << 8
            | *chunk.get(2).unwrap_or(&0) as u32;

        for slot in 0..4 {
            let index = if slot <= chunk.len() {
                ((n >> (18 - 6 * slot)) & 63) as usize
            } else {
                64
            };
            out.push(alphabet[index] as char);
        }
    }
    out
}

fn unix_seconds() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or_default()
}
