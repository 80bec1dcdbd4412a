//! Fixed timezone abbreviation table.
//!
//! Maps lowercase abbreviations to offsets in minutes east of UTC, including
//! the single-letter military zones (J is deliberately absent — it means
//! "local time" and carries no fixed offset). This is a fixed table, not a
//! timezone database: ambiguous abbreviations resolve to one conventional
//! offset.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const ABBREVIATIONS: &[(&str, i64)] = &[
    // Military single-letter zones.
    ("a", 60),
    ("b", 120),
    ("c", 180),
    ("d", 240),
    ("e", 300),
    ("f", 360),
    ("g", 420),
    ("h", 480),
    ("i", 540),
    ("k", 600),
    ("l", 660),
    ("m", 720),
    ("n", -60),
    ("o", -120),
    ("p", -180),
    ("q", -240),
    ("r", -300),
    ("s", -360),
    ("t", -420),
    ("u", -480),
    ("v", -540),
    ("w", -600),
    ("x", -660),
    ("y", -720),
    ("z", 0),
    ("zulu", 0),
    // Named abbreviations.
    ("acdt", 630),
    ("acst", 570),
    ("adt", -180),
    ("aedt", 660),
    ("aest", 600),
    ("aft", 270),
    ("akdt", -480),
    ("akst", -540),
    ("almt", 360),
    ("amst", -180),
    ("amt", -240),
    ("anat", 720),
    ("aqtt", 300),
    ("art", -180),
    ("ast", -240),
    ("awst", 480),
    ("azost", 0),
    ("azot", -60),
    ("azt", 240),
    ("biot", 390),
    ("bit", -720),
    ("bnt", 480),
    ("bot", -240),
    ("brst", -120),
    ("brt", -180),
    ("bst", 60),
    ("btt", 360),
    ("cat", 120),
    ("cct", 390),
    ("cdt", -300),
    ("cest", 120),
    ("cet", 60),
    ("chadt", 825),
    ("chast", 765),
    ("chost", 540),
    ("chot", 480),
    ("chst", 600),
    ("chut", 600),
    ("cist", -480),
    ("ckt", -600),
    ("clst", -180),
    ("clt", -240),
    ("cost", -240),
    ("cot", -300),
    ("cst", -360),
    ("cvt", -60),
    ("cwst", 525),
    ("cxt", 420),
    ("davt", 420),
    ("ddut", 600),
    ("easst", -300),
    ("east", -360),
    ("eat", 180),
    ("ect", -300),
    ("edt", -240),
    ("eest", 180),
    ("eet", 120),
    ("egst", 0),
    ("egt", -60),
    ("est", -300),
    ("fet", 180),
    ("fjt", 720),
    ("fkst", -180),
    ("fkt", -240),
    ("fnt", -120),
    ("galt", -360),
    ("gamt", -540),
    ("get", 240),
    ("gft", -180),
    ("gilt", 720),
    ("git", -540),
    ("gmt", 0),
    ("gst", 240),
    ("gyt", -240),
    ("hdt", -540),
    ("hkt", 480),
    ("hmt", 300),
    ("hovt", 420),
    ("hst", -600),
    ("ict", 420),
    ("idt", 180),
    ("iot", 360),
    ("irdt", 270),
    ("irkt", 480),
    ("irst", 210),
    ("ist", 330),
    ("jst", 540),
    ("kgt", 360),
    ("kost", 660),
    ("krat", 420),
    ("kst", 540),
    ("lhdt", 660),
    ("lhst", 630),
    ("lint", 840),
    ("magt", 660),
    ("mart", -570),
    ("mawt", 300),
    ("mdt", -360),
    ("mest", 120),
    ("met", 60),
    ("mht", 720),
    ("mist", 660),
    ("mit", -570),
    ("mmt", 390),
    ("msk", 180),
    ("mst", -420),
    ("mut", 240),
    ("mvt", 300),
    ("myt", 480),
    ("nct", 660),
    ("ndt", -150),
    ("nft", 660),
    ("novt", 420),
    ("npt", 345),
    ("nst", -210),
    ("nt", -210),
    ("nut", -660),
    ("nzdt", 780),
    ("nzst", 720),
    ("omst", 360),
    ("orat", 300),
    ("pdt", -420),
    ("pet", -300),
    ("pett", 720),
    ("pgt", 600),
    ("phot", 780),
    ("pht", 480),
    ("pkt", 300),
    ("pmdt", -120),
    ("pmst", -180),
    ("pont", 660),
    ("pst", -480),
    ("pwt", 540),
    ("pyst", -180),
    ("pyt", -240),
    ("ret", 240),
    ("rott", -180),
    ("sakt", 660),
    ("samt", 240),
    ("sast", 120),
    ("sbt", 660),
    ("sct", 240),
    ("sgt", 480),
    ("slst", 330),
    ("sret", 660),
    ("srt", -180),
    ("sst", -660),
    ("syot", 180),
    ("taht", -600),
    ("tft", 300),
    ("tha", 420),
    ("tjt", 300),
    ("tkt", 780),
    ("tlt", 540),
    ("tmt", 300),
    ("tot", 780),
    ("tvt", 720),
    ("ulat", 480),
    ("utc", 0),
    ("uyst", -120),
    ("uyt", -180),
    ("uzt", 300),
    ("vet", -270),
    ("vlat", 600),
    ("volt", 240),
    ("vost", 360),
    ("vut", 660),
    ("wakt", 720),
    ("wast", 120),
    ("wat", 60),
    ("west", 60),
    ("wet", 0),
    ("wgst", -120),
    ("wgt", -180),
    ("wib", 420),
    ("wit", 540),
    ("wita", 480),
    ("wst", 480),
    ("yakt", 540),
    ("yekt", 300),
];

static TABLE: Lazy<HashMap<&'static str, i64>> =
    Lazy::new(|| ABBREVIATIONS.iter().copied().collect());

/// Offset in minutes east of UTC for a lowercase abbreviation.
pub fn abbreviation_offset(abbr: &str) -> Option<i64> {
    TABLE.get(abbr).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_abbreviations() {
        assert_eq!(abbreviation_offset("utc"), Some(0));
        assert_eq!(abbreviation_offset("gmt"), Some(0));
        assert_eq!(abbreviation_offset("est"), Some(-300));
        assert_eq!(abbreviation_offset("cest"), Some(120));
        assert_eq!(abbreviation_offset("ist"), Some(330));
        assert_eq!(abbreviation_offset("nzdt"), Some(780));
    }

    #[test]
    fn test_military_zones() {
        assert_eq!(abbreviation_offset("a"), Some(60));
        assert_eq!(abbreviation_offset("m"), Some(720));
        assert_eq!(abbreviation_offset("y"), Some(-720));
        assert_eq!(abbreviation_offset("z"), Some(0));
        assert_eq!(abbreviation_offset("j"), None);
    }

    #[test]
    fn test_unknown_abbreviation() {
        assert_eq!(abbreviation_offset("bogustz"), None);
        assert_eq!(abbreviation_offset("xyzzy"), None);
    }

    #[test]
    fn test_no_duplicate_entries() {
        assert_eq!(TABLE.len(), ABBREVIATIONS.len());
    }
}
