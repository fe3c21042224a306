//! Static catalog of the pretrained GloVe models this crate knows how to load.

use serde::Serialize;

use crate::error::{GloveError, GloveResult};

/// Metadata for one downloadable pretrained embedding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub name: &'static str,
    pub dimensions: usize,
    pub corpus_size: &'static str,
    pub vocabulary_size: &'static str,
    pub download_url: &'static str,
    pub format: &'static str,
    pub architecture: &'static str,
    pub trained_data: &'static str,
    pub language: &'static str,
}

const TWITTER: &str = "Twitter 2B Tweets";
const WIKI: &str = "Wikipedia+Gigaword";

const fn glove(
    name: &'static str,
    dimensions: usize,
    corpus_size: &'static str,
    vocabulary_size: &'static str,
    download_url: &'static str,
    trained_data: &'static str,
) -> ModelDescriptor {
    ModelDescriptor {
        name,
        dimensions,
        corpus_size,
        vocabulary_size,
        download_url,
        format: "zip",
        architecture: "glove",
        trained_data,
        language: "en",
    }
}

static MODELS: &[ModelDescriptor] = &[
    glove(
        "twitter_100",
        100,
        "27B",
        "1.2M",
        "https://www.dropbox.com/s/q2wof83a0yq7q74/glove.twitter.27B.100d.txt.zip?dl=1",
        TWITTER,
    ),
    glove(
        "twitter_200",
        200,
        "27B",
        "1.2M",
        "https://www.dropbox.com/s/hfw00m77ibz24y5/glove.twitter.27B.200d.txt.zip?dl=1",
        TWITTER,
    ),
    glove(
        "twitter_25",
        25,
        "27B",
        "1.2M",
        "https://www.dropbox.com/s/jx97sz8skdp276k/glove.twitter.27B.25d.txt.zip?dl=1",
        TWITTER,
    ),
    glove(
        "twitter_50",
        50,
        "27B",
        "1.2M",
        "https://www.dropbox.com/s/9mutj8syz3q20e3/glove.twitter.27B.50d.txt.zip?dl=1",
        TWITTER,
    ),
    glove(
        "wiki_100",
        100,
        "6B",
        "0.4M",
        "https://www.dropbox.com/s/g0inzrsy1ds3u63/glove.6B.100d.txt.zip?dl=1",
        WIKI,
    ),
    glove(
        "wiki_200",
        200,
        "6B",
        "0.4M",
        "https://www.dropbox.com/s/pmj2ycd882qkae5/glove.6B.200d.txt.zip?dl=1",
        WIKI,
    ),
    glove(
        "wiki_300",
        300,
        "6B",
        "0.4M",
        "https://www.dropbox.com/s/9jbbk99p0d0n1bw/glove.6B.300d.txt.zip?dl=1",
        WIKI,
    ),
    glove(
        "wiki_50",
        50,
        "6B",
        "0.4M",
        "https://www.dropbox.com/s/o3axsz1j47043si/glove.6B.50d.txt.zip?dl=1",
        WIKI,
    ),
    glove(
        "crawl_42B_300",
        300,
        "42B",
        "1.9M",
        "http://nlp.stanford.edu/data/glove.42B.300d.zip",
        "Common Crawl (42B tokens)",
    ),
    glove(
        "crawl_840B_300",
        300,
        "840B",
        "2.2M",
        "http://nlp.stanford.edu/data/glove.840B.300d.zip",
        "Common Crawl (840B tokens)",
    ),
];

/// All known models, in catalog order.
pub fn models() -> &'static [ModelDescriptor] {
    MODELS
}

/// Look up a model by name.
pub fn resolve(name: &str) -> GloveResult<&'static ModelDescriptor> {
    MODELS
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| GloveError::KeyNotFound(name.to_string()))
}
