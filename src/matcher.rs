use crate::caption::Caption;

// @module: Temporal overlap matcher
//
// Pairs a reference caption with the translation captions shown while it
// was on screen. Both tracks are individually start-ordered and
// non-overlapping, so the overlapping translations always form one
// contiguous run; a stateless forward scan per reference caption finds it.
// Rescanning from the start of the track for every caption is quadratic in
// the worst case, but subtitle tracks are small and the statelessness
// makes concurrent matching against a shared track trivially safe.

/// Return the maximal contiguous run of `translations` whose intervals
/// intersect `reference`, under a closed-interval convention: touching
/// boundaries count as overlap. Returns an empty slice when nothing
/// overlaps.
pub fn overlapping_captions<'a>(
    reference: &Caption,
    translations: &'a [Caption],
) -> &'a [Caption] {
    let mut i = 0;
    while i < translations.len() && !(reference.start <= translations[i].end) {
        i += 1;
    }
    let mut j = i;
    while j < translations.len() && !(reference.end < translations[j].start) {
        j += 1;
    }
    &translations[i..j]
}
