//! Small networks shared by the integration tests.

#![allow(dead_code)]

use lexnet_engine::{Config, LexNet, Source, Sources};

/// `taal` has three senses; sense 1 shares a synset with `taaluiting` and
/// sits under `medium` and `communicatiemiddel`, sense 2 is the instrument
/// of `spraak` sense 3.
pub const TAAL_UNITS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cdb_lu_db>
  <cdb_lu c_lu_id="r_n-taal-1" c_seq_nr="1"><form form-cat="noun" form-spelling="taal"/></cdb_lu>
  <cdb_lu c_lu_id="r_n-taal-2" c_seq_nr="2"><form form-cat="noun" form-spelling="taal"/></cdb_lu>
  <cdb_lu c_lu_id="r_n-taal-3" c_seq_nr="3"><form form-cat="noun" form-spelling="taal"/></cdb_lu>
  <cdb_lu c_lu_id="r_n-taaluiting" c_seq_nr="1"><form form-cat="noun" form-spelling="taaluiting"/></cdb_lu>
  <cdb_lu c_lu_id="r_n-medium" c_seq_nr="1"><form form-cat="noun" form-spelling="medium"/></cdb_lu>
  <cdb_lu c_lu_id="r_n-cm" c_seq_nr="1"><form form-cat="noun" form-spelling="communicatiemiddel"/></cdb_lu>
  <cdb_lu c_lu_id="r_n-spraak-1" c_seq_nr="1"><form form-cat="noun" form-spelling="spraak"/></cdb_lu>
  <cdb_lu c_lu_id="r_n-spraak-2" c_seq_nr="2"><form form-cat="noun" form-spelling="spraak"/></cdb_lu>
  <cdb_lu c_lu_id="r_n-spraak-3" c_seq_nr="3"><form form-cat="noun" form-spelling="spraak"/></cdb_lu>
  <cdb_lu c_lu_id="r_v-spreken" c_seq_nr="1"><form form-cat="verb" form-spelling="spreken"/></cdb_lu>
</cdb_lu_db>
"#;

pub const TAAL_SYNSETS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cdb_syn_db>
  <cdb_synset c_sy_id="d_n-taal-3">
    <synonyms><synonym c_lu_id="r_n-taal-3"/></synonyms>
  </cdb_synset>
  <cdb_synset c_sy_id="d_n-taal-1" d_synset_id="n_taal_1">
    <synonyms><synonym c_lu_id="r_n-taal-1"/><synonym c_lu_id="r_n-taaluiting"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPERONYM" target="d_n-medium"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="d_n-taal-2">
    <synonyms><synonym c_lu_id="r_n-taal-2"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="ROLE_INSTRUMENT" target="d_n-spraak-3"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="d_n-medium">
    <synonyms><synonym c_lu_id="r_n-medium"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPERONYM" target="d_n-cm"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="d_n-cm">
    <synonyms><synonym c_lu_id="r_n-cm"/></synonyms>
  </cdb_synset>
  <cdb_synset c_sy_id="d_n-spraak-1">
    <synonyms><synonym c_lu_id="r_n-spraak-1"/></synonyms>
  </cdb_synset>
  <cdb_synset c_sy_id="d_n-spraak-2">
    <synonyms><synonym c_lu_id="r_n-spraak-2"/></synonyms>
  </cdb_synset>
  <cdb_synset c_sy_id="d_n-spraak-3">
    <synonyms><synonym c_lu_id="r_n-spraak-3"/></synonyms>
  </cdb_synset>
</cdb_syn_db>
"#;

/// `entiteit` above `dier` above `hond` and `kat`; `entiteit` lists `plant`
/// as a hyponym; `steen` stands alone. `vos` sense 1 sits under `dier`,
/// sense 2 directly under `entiteit`.
pub const ZOO_UNITS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cdb_lu_db>
  <cdb_lu c_lu_id="u-entiteit" c_seq_nr="1"><form form-cat="noun" form-spelling="entiteit"/></cdb_lu>
  <cdb_lu c_lu_id="u-dier" c_seq_nr="1"><form form-cat="noun" form-spelling="dier"/></cdb_lu>
  <cdb_lu c_lu_id="u-hond" c_seq_nr="1"><form form-cat="noun" form-spelling="hond"/></cdb_lu>
  <cdb_lu c_lu_id="u-kat" c_seq_nr="1"><form form-cat="noun" form-spelling="kat"/></cdb_lu>
  <cdb_lu c_lu_id="u-plant" c_seq_nr="1"><form form-cat="noun" form-spelling="plant"/></cdb_lu>
  <cdb_lu c_lu_id="u-steen" c_seq_nr="1"><form form-cat="noun" form-spelling="steen"/></cdb_lu>
  <cdb_lu c_lu_id="u-bank-1" c_seq_nr="1"><form form-cat="noun" form-spelling="bank"/></cdb_lu>
  <cdb_lu c_lu_id="u-bank-2" c_seq_nr="2"><form form-cat="noun" form-spelling="bank"/></cdb_lu>
  <cdb_lu c_lu_id="u-vos-1" c_seq_nr="1"><form form-cat="noun" form-spelling="vos"/></cdb_lu>
  <cdb_lu c_lu_id="u-vos-2" c_seq_nr="2"><form form-cat="noun" form-spelling="vos"/></cdb_lu>
</cdb_lu_db>
"#;

pub const ZOO_SYNSETS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cdb_syn_db>
  <cdb_synset c_sy_id="s-entiteit">
    <synonyms><synonym c_lu_id="u-entiteit"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPONYM" target="s-plant"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="s-dier">
    <synonyms><synonym c_lu_id="u-dier"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPERONYM" target="s-entiteit"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="s-hond">
    <synonyms><synonym c_lu_id="u-hond"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPERONYM" target="s-dier"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="s-kat">
    <synonyms><synonym c_lu_id="u-kat"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPERONYM" target="s-dier"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="s-plant">
    <synonyms><synonym c_lu_id="u-plant"/></synonyms>
  </cdb_synset>
  <cdb_synset c_sy_id="s-steen">
    <synonyms><synonym c_lu_id="u-steen"/></synonyms>
  </cdb_synset>
  <cdb_synset c_sy_id="s-bank-1">
    <synonyms><synonym c_lu_id="u-bank-1"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPERONYM" target="s-entiteit"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="s-bank-2">
    <synonyms><synonym c_lu_id="u-bank-2"/></synonyms>
  </cdb_synset>
  <cdb_synset c_sy_id="s-vos-1">
    <synonyms><synonym c_lu_id="u-vos-1"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPERONYM" target="s-dier"/>
    </wn_internal_relations>
  </cdb_synset>
  <cdb_synset c_sy_id="s-vos-2">
    <synonyms><synonym c_lu_id="u-vos-2"/></synonyms>
    <wn_internal_relations>
      <relation relation_name="HAS_HYPERONYM" target="s-entiteit"/>
    </wn_internal_relations>
  </cdb_synset>
</cdb_syn_db>
"#;

/// Count, form, tag. `bank` and `vos` have no entry and count as zero.
pub const ZOO_COUNTS: &str = "\
2 entiteit N
2 dier N
8 hond N
4 kat N
4 plant N
12 steen N
";

pub fn taal_sources() -> Sources {
    Sources::new(
        Source::text("taal units", TAAL_UNITS),
        Source::text("taal synsets", TAAL_SYNSETS),
    )
}

pub fn zoo_sources() -> Sources {
    zoo_sources_counting(ZOO_COUNTS)
}

pub fn zoo_sources_counting(counts: &str) -> Sources {
    Sources::new(
        Source::text("zoo units", ZOO_UNITS),
        Source::text("zoo synsets", ZOO_SYNSETS),
    )
    .with_counts(Source::text("zoo counts", counts.to_string()))
}

pub fn taal() -> LexNet {
    taal_with(Config::default())
}

pub fn taal_with(config: Config) -> LexNet {
    let net = LexNet::new(config).unwrap();
    net.load(taal_sources()).unwrap();
    net
}

pub fn zoo() -> LexNet {
    zoo_with(Config::default())
}

pub fn zoo_with(config: Config) -> LexNet {
    let net = LexNet::new(config).unwrap();
    net.load(zoo_sources()).unwrap();
    net
}
