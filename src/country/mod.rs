//! Country standardization for born-location text
//!
//! Author pages carry free-form location strings like "in Barcelona, Spain"
//! or "The United States". This module maps such text onto a canonical
//! country name via a whole-word alias scan, preferring the longest matching
//! variant so "South Korea" never resolves through a shorter alias.

/// Alias table: normalized lowercase variant -> canonical country name
///
/// Variants are pre-normalized the same way the input text is (lowercase,
/// punctuation collapsed to single spaces). Identity entries cover the
/// canonical names themselves.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    // Common variations and historical names
    ("usa", "United States"),
    ("us", "United States"),
    ("u s", "United States"),
    ("u s a", "United States"),
    ("america", "United States"),
    ("united states of america", "United States"),
    ("united states", "United States"),
    ("uk", "United Kingdom"),
    ("u k", "United Kingdom"),
    ("britain", "United Kingdom"),
    ("great britain", "United Kingdom"),
    ("england", "United Kingdom"),
    ("scotland", "United Kingdom"),
    ("wales", "United Kingdom"),
    ("northern ireland", "United Kingdom"),
    ("united kingdom", "United Kingdom"),
    ("republic of ireland", "Ireland"),
    ("russia", "Russian Federation"),
    ("russian federation", "Russian Federation"),
    ("vietnam", "Viet Nam"),
    ("viet nam", "Viet Nam"),
    ("czech republic", "Czechia"),
    ("czechia", "Czechia"),
    ("burma", "Myanmar"),
    ("drc", "Democratic Republic of the Congo"),
    ("dr congo", "Democratic Republic of the Congo"),
    ("democratic republic of the congo", "Democratic Republic of the Congo"),
    ("congo", "Congo"),
    ("tanzania", "United Republic of Tanzania"),
    ("ivory coast", "Côte d'Ivoire"),
    ("cote d ivoire", "Côte d'Ivoire"),
    ("côte d ivoire", "Côte d'Ivoire"),
    ("holland", "Netherlands"),
    ("the netherlands", "Netherlands"),
    ("south korea", "South Korea"),
    ("republic of korea", "South Korea"),
    ("north korea", "North Korea"),
    // Canonical names
    ("afghanistan", "Afghanistan"),
    ("albania", "Albania"),
    ("algeria", "Algeria"),
    ("argentina", "Argentina"),
    ("armenia", "Armenia"),
    ("australia", "Australia"),
    ("austria", "Austria"),
    ("bangladesh", "Bangladesh"),
    ("belgium", "Belgium"),
    ("bolivia", "Bolivia"),
    ("bosnia and herzegovina", "Bosnia and Herzegovina"),
    ("brazil", "Brazil"),
    ("bulgaria", "Bulgaria"),
    ("cambodia", "Cambodia"),
    ("cameroon", "Cameroon"),
    ("canada", "Canada"),
    ("chile", "Chile"),
    ("china", "China"),
    ("colombia", "Colombia"),
    ("croatia", "Croatia"),
    ("cuba", "Cuba"),
    ("denmark", "Denmark"),
    ("dominican republic", "Dominican Republic"),
    ("ecuador", "Ecuador"),
    ("egypt", "Egypt"),
    ("estonia", "Estonia"),
    ("ethiopia", "Ethiopia"),
    ("finland", "Finland"),
    ("france", "France"),
    ("georgia", "Georgia"),
    ("germany", "Germany"),
    ("ghana", "Ghana"),
    ("greece", "Greece"),
    ("guatemala", "Guatemala"),
    ("haiti", "Haiti"),
    ("hungary", "Hungary"),
    ("iceland", "Iceland"),
    ("india", "India"),
    ("indonesia", "Indonesia"),
    ("iran", "Iran"),
    ("iraq", "Iraq"),
    ("ireland", "Ireland"),
    ("israel", "Israel"),
    ("italy", "Italy"),
    ("jamaica", "Jamaica"),
    ("japan", "Japan"),
    ("jordan", "Jordan"),
    ("kazakhstan", "Kazakhstan"),
    ("kenya", "Kenya"),
    ("kuwait", "Kuwait"),
    ("latvia", "Latvia"),
    ("lebanon", "Lebanon"),
    ("libya", "Libya"),
    ("lithuania", "Lithuania"),
    ("luxembourg", "Luxembourg"),
    ("malaysia", "Malaysia"),
    ("mexico", "Mexico"),
    ("mongolia", "Mongolia"),
    ("morocco", "Morocco"),
    ("myanmar", "Myanmar"),
    ("nepal", "Nepal"),
    ("netherlands", "Netherlands"),
    ("new zealand", "New Zealand"),
    ("nicaragua", "Nicaragua"),
    ("nigeria", "Nigeria"),
    ("norway", "Norway"),
    ("pakistan", "Pakistan"),
    ("palestine", "Palestine"),
    ("panama", "Panama"),
    ("paraguay", "Paraguay"),
    ("peru", "Peru"),
    ("philippines", "Philippines"),
    ("poland", "Poland"),
    ("portugal", "Portugal"),
    ("romania", "Romania"),
    ("saudi arabia", "Saudi Arabia"),
    ("senegal", "Senegal"),
    ("serbia", "Serbia"),
    ("singapore", "Singapore"),
    ("slovakia", "Slovakia"),
    ("slovenia", "Slovenia"),
    ("somalia", "Somalia"),
    ("south africa", "South Africa"),
    ("spain", "Spain"),
    ("sri lanka", "Sri Lanka"),
    ("sudan", "Sudan"),
    ("sweden", "Sweden"),
    ("switzerland", "Switzerland"),
    ("syria", "Syria"),
    ("taiwan", "Taiwan"),
    ("thailand", "Thailand"),
    ("trinidad and tobago", "Trinidad and Tobago"),
    ("tunisia", "Tunisia"),
    ("turkey", "Turkey"),
    ("uganda", "Uganda"),
    ("ukraine", "Ukraine"),
    ("uruguay", "Uruguay"),
    ("uzbekistan", "Uzbekistan"),
    ("venezuela", "Venezuela"),
    ("yemen", "Yemen"),
    ("zambia", "Zambia"),
    ("zimbabwe", "Zimbabwe"),
];

/// Extracts a canonical country name from free-form location text
///
/// Matches aliases as whole words only; among several matches the longest
/// variant wins. Returns `None` when nothing in the table matches.
pub fn extract_country(text: &str) -> Option<String> {
    let normalized = normalize(text);
    if normalized.trim().is_empty() {
        return None;
    }

    let mut best: Option<(usize, &str)> = None;
    for (variant, canonical) in COUNTRY_ALIASES {
        let needle = format!(" {} ", variant);
        if normalized.contains(&needle) {
            match best {
                Some((len, _)) if len >= variant.len() => {}
                _ => best = Some((variant.len(), canonical)),
            }
        }
    }

    best.map(|(_, canonical)| canonical.to_string())
}

/// Lowercases, collapses punctuation/whitespace runs to single spaces, and
/// pads with spaces so whole-word matching is a plain substring check
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');

    let mut last_was_space = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                out.push(lower);
            }
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }

    if !last_was_space {
        out.push(' ');
    }
    out
}
