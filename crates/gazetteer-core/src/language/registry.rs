// crates/gazetteer-core/src/language/registry.rs

//! Bundled subset of the IANA language subtag registry.
//!
//! `LANGUAGES` maps a primary language subtag to its Suppress-Script (the
//! script implied when a tag names none). `None` means the registry records
//! no default script for that language, e.g. `grc`.

use phf::{phf_map, phf_set};

pub static LANGUAGES: phf::Map<&'static str, Option<&'static str>> = phf_map! {
    // ISO 639-1
    "aa" => None, "ab" => Some("Cyrl"), "ae" => None, "af" => Some("Latn"),
    "ak" => None, "am" => Some("Ethi"), "an" => None, "ar" => Some("Arab"),
    "as" => Some("Beng"), "av" => None, "ay" => Some("Latn"), "az" => None,
    "ba" => None, "be" => Some("Cyrl"), "bg" => Some("Cyrl"), "bh" => None,
    "bi" => None, "bm" => None, "bn" => Some("Beng"), "bo" => None,
    "br" => None, "bs" => Some("Latn"), "ca" => Some("Latn"), "ce" => None,
    "ch" => Some("Latn"), "co" => None, "cr" => None, "cs" => Some("Latn"),
    "cu" => None, "cv" => None, "cy" => Some("Latn"), "da" => Some("Latn"),
    "de" => Some("Latn"), "dv" => Some("Thaa"), "dz" => Some("Tibt"), "ee" => None,
    "el" => Some("Grek"), "en" => Some("Latn"), "eo" => Some("Latn"), "es" => Some("Latn"),
    "et" => Some("Latn"), "eu" => Some("Latn"), "fa" => Some("Arab"), "ff" => None,
    "fi" => Some("Latn"), "fj" => Some("Latn"), "fo" => Some("Latn"), "fr" => Some("Latn"),
    "fy" => Some("Latn"), "ga" => Some("Latn"), "gd" => None, "gl" => Some("Latn"),
    "gn" => Some("Latn"), "gu" => Some("Gujr"), "gv" => Some("Latn"), "ha" => None,
    "he" => Some("Hebr"), "hi" => Some("Deva"), "ho" => None, "hr" => Some("Latn"),
    "ht" => Some("Latn"), "hu" => Some("Latn"), "hy" => Some("Armn"), "hz" => None,
    "ia" => None, "id" => Some("Latn"), "ie" => Some("Latn"), "ig" => None,
    "ii" => None, "ik" => None, "io" => None, "is" => Some("Latn"),
    "it" => Some("Latn"), "iu" => None, "ja" => Some("Jpan"), "jv" => None,
    "ka" => Some("Geor"), "kg" => None, "ki" => None, "kj" => None,
    "kk" => Some("Cyrl"), "kl" => Some("Latn"), "km" => Some("Khmr"), "kn" => Some("Knda"),
    "ko" => Some("Kore"), "kr" => None, "ks" => None, "ku" => None,
    "kv" => None, "kw" => None, "ky" => None, "la" => Some("Latn"),
    "lb" => Some("Latn"), "lg" => None, "li" => None, "ln" => Some("Latn"),
    "lo" => Some("Laoo"), "lt" => Some("Latn"), "lu" => None, "lv" => Some("Latn"),
    "mg" => Some("Latn"), "mh" => Some("Latn"), "mi" => None, "mk" => Some("Cyrl"),
    "ml" => Some("Mlym"), "mn" => None, "mr" => Some("Deva"), "ms" => Some("Latn"),
    "mt" => Some("Latn"), "my" => Some("Mymr"), "na" => Some("Latn"), "nb" => Some("Latn"),
    "nd" => Some("Latn"), "ne" => Some("Deva"), "ng" => None, "nl" => Some("Latn"),
    "nn" => Some("Latn"), "no" => Some("Latn"), "nr" => Some("Latn"), "nv" => None,
    "ny" => Some("Latn"), "oc" => None, "oj" => None, "om" => Some("Latn"),
    "or" => Some("Orya"), "os" => None, "pa" => Some("Guru"), "pi" => None,
    "pl" => Some("Latn"), "ps" => Some("Arab"), "pt" => Some("Latn"), "qu" => Some("Latn"),
    "rm" => Some("Latn"), "rn" => Some("Latn"), "ro" => Some("Latn"), "ru" => Some("Cyrl"),
    "rw" => Some("Latn"), "sa" => None, "sc" => None, "sd" => None,
    "se" => None, "sg" => Some("Latn"), "si" => Some("Sinh"), "sk" => Some("Latn"),
    "sl" => Some("Latn"), "sm" => Some("Latn"), "sn" => None, "so" => Some("Latn"),
    "sq" => Some("Latn"), "sr" => None, "ss" => Some("Latn"), "st" => Some("Latn"),
    "su" => None, "sv" => Some("Latn"), "sw" => Some("Latn"), "ta" => Some("Taml"),
    "te" => Some("Telu"), "tg" => None, "th" => Some("Thai"), "ti" => Some("Ethi"),
    "tk" => None, "tl" => Some("Latn"), "tn" => Some("Latn"), "to" => Some("Latn"),
    "tr" => Some("Latn"), "ts" => Some("Latn"), "tt" => None, "tw" => None,
    "ty" => None, "ug" => None, "uk" => Some("Cyrl"), "ur" => Some("Arab"),
    "uz" => None, "ve" => Some("Latn"), "vi" => Some("Latn"), "vo" => None,
    "wa" => None, "wo" => None, "xh" => Some("Latn"), "yi" => Some("Hebr"),
    "yo" => None, "za" => None, "zh" => None, "zu" => Some("Latn"),
    // special
    "und" => None, "mul" => None, "mis" => None, "zxx" => None,
    // ancient and historical
    "akk" => None, "ang" => None, "arc" => None, "ave" => None,
    "cop" => None, "dum" => None, "egy" => None, "elx" => None,
    "enm" => None, "ett" => None, "frm" => None, "fro" => None,
    "gez" => Some("Ethi"), "gmh" => None, "gmy" => None, "goh" => None,
    "got" => Some("Goth"), "grc" => None, "hbo" => None, "hit" => None,
    "non" => None, "obm" => None, "osc" => None, "ota" => Some("Arab"),
    "pal" => None, "peo" => Some("Xpeo"), "phn" => Some("Phnx"), "pro" => None,
    "sga" => None, "sog" => None, "sux" => None, "syc" => None,
    "uga" => Some("Ugar"), "xbc" => None, "xcl" => None, "xcr" => Some("Cari"),
    "xeb" => None, "xhu" => None, "xlc" => Some("Lyci"), "xld" => Some("Lydi"),
    "xlu" => None, "xna" => None, "xpr" => None, "xpu" => None,
    "xsa" => None, "xto" => None, "xum" => None, "xve" => None,
    // modern languages commonly met in gazetteers without a 639-1 code
    "ast" => None, "ber" => None, "ckb" => None, "cmn" => None,
    "fil" => None, "fur" => None, "gsw" => Some("Latn"), "haw" => None,
    "jrb" => None, "kab" => None, "lad" => None, "lij" => None,
    "lmo" => None, "nap" => None, "nds" => Some("Latn"), "scn" => None,
    "syr" => None, "tzm" => None, "vec" => None, "yue" => None,
    "zgh" => Some("Tfng"),
};

/// ISO 15924 script codes accepted in the script position.
pub static SCRIPTS: phf::Set<&'static str> = phf_set! {
    "Adlm", "Aghb", "Ahom", "Arab", "Aran", "Armi", "Armn", "Avst", "Bali", "Bamu",
    "Bass", "Batk", "Beng", "Bhks", "Bopo", "Brah", "Brai", "Bugi", "Buhd", "Cakm",
    "Cans", "Cari", "Cham", "Cher", "Copt", "Cprt", "Cyrl", "Cyrs", "Deva", "Dogr",
    "Dsrt", "Dupl", "Egyd", "Egyh", "Egyp", "Elba", "Elym", "Ethi", "Geok", "Geor",
    "Glag", "Gong", "Gonm", "Goth", "Gran", "Grek", "Gujr", "Guru", "Hanb", "Hang",
    "Hani", "Hano", "Hans", "Hant", "Hatr", "Hebr", "Hira", "Hluw", "Hmng", "Hmnp",
    "Hrkt", "Hung", "Ital", "Jamo", "Java", "Jpan", "Kali", "Kana", "Khar", "Khmr",
    "Khoj", "Knda", "Kore", "Kthi", "Lana", "Laoo", "Latf", "Latg", "Latn", "Lepc",
    "Limb", "Lina", "Linb", "Lisu", "Lyci", "Lydi", "Mahj", "Maka", "Mand", "Mani",
    "Marc", "Medf", "Mend", "Merc", "Mero", "Mlym", "Modi", "Mong", "Mroo", "Mtei",
    "Mult", "Mymr", "Nand", "Narb", "Nbat", "Newa", "Nkoo", "Nshu", "Ogam", "Olck",
    "Orkh", "Orya", "Osge", "Osma", "Palm", "Pauc", "Perm", "Phag", "Phli", "Phlp",
    "Phnx", "Plrd", "Prti", "Rjng", "Rohg", "Runr", "Samr", "Sarb", "Saur", "Sgnw",
    "Shaw", "Shrd", "Sidd", "Sind", "Sinh", "Sogd", "Sogo", "Sora", "Soyo", "Sund",
    "Sylo", "Syrc", "Syre", "Syrj", "Syrn", "Tagb", "Takr", "Tale", "Talu", "Taml",
    "Tang", "Tavt", "Telu", "Tfng", "Tglg", "Thaa", "Thai", "Tibt", "Tirh", "Ugar",
    "Vaii", "Wara", "Wcho", "Xpeo", "Xsux", "Yiii", "Zanb", "Zinh", "Zmth", "Zsye",
    "Zsym", "Zxxx", "Zyyy", "Zzzz",
};

/// Grandfathered tags, keyed by their lowercase form.
pub static GRANDFATHERED: phf::Map<&'static str, &'static str> = phf_map! {
    "en-gb-oed" => "en-GB-oed",
    "i-ami" => "i-ami",
    "i-bnn" => "i-bnn",
    "i-default" => "i-default",
    "i-enochian" => "i-enochian",
    "i-hak" => "i-hak",
    "i-klingon" => "i-klingon",
    "i-lux" => "i-lux",
    "i-mingo" => "i-mingo",
    "i-navajo" => "i-navajo",
    "i-pwn" => "i-pwn",
    "i-tao" => "i-tao",
    "i-tay" => "i-tay",
    "i-tsu" => "i-tsu",
    "sgn-be-fr" => "sgn-BE-FR",
    "sgn-be-nl" => "sgn-BE-NL",
    "sgn-ch-de" => "sgn-CH-DE",
    "art-lojban" => "art-lojban",
    "cel-gaulish" => "cel-gaulish",
    "no-bok" => "no-bok",
    "no-nyn" => "no-nyn",
    "zh-guoyu" => "zh-guoyu",
    "zh-hakka" => "zh-hakka",
    "zh-min" => "zh-min",
    "zh-min-nan" => "zh-min-nan",
    "zh-xiang" => "zh-xiang",
};

/// Registered primary language (lowercase input), including `qaa`..`qtz`.
pub fn is_registered_language(subtag: &str) -> bool {
    if LANGUAGES.contains_key(subtag) {
        return true;
    }
    match subtag.as_bytes() {
        [b'q', second, third] => (b'a'..=b't').contains(second) && third.is_ascii_lowercase(),
        _ => false,
    }
}

/// Registered script (titlecase input), including `Qaaa`..`Qabx`.
pub fn is_registered_script(subtag: &str) -> bool {
    if SCRIPTS.contains(subtag) {
        return true;
    }
    match subtag.as_bytes() {
        [b'Q', b'a', b'a', last] => last.is_ascii_lowercase(),
        [b'Q', b'a', b'b', last] => (b'a'..=b'x').contains(last),
        _ => false,
    }
}

/// Suppress-Script for a registered language, if the registry lists one.
pub fn default_script(language: &str) -> Option<&'static str> {
    LANGUAGES.get(language).copied().flatten()
}
