//! Shared map fixtures for unit tests.

use crate::{config::LoadConfig, map::ChannelMap};

/// Four integer keys, no reverse-key column.
pub(crate) const WIB_MAP: &str = "\
4
crate slot stream chan
I I I I
1 1 1 1
1 2 3 4
";

/// Two keys plus text, float, and reverse-key columns.
pub(crate) const APA_MAP: &str = "\
# APA readout map
6              # columns
offlchan crate wib apa plane gain
I I I S C F
0 1 1 0 0 0
0    1 1 APA_1 U 14.0
1    1 2 APA_1 V 14.0   # second wib
# spare row
2    2 1 APA_2 X 7.8
";

pub(crate) fn load(text: &str) -> ChannelMap {
    ChannelMap::from_reader(text.as_bytes(), LoadConfig::default()).expect("fixture map loads")
}
