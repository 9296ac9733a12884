//! # Florida Counties
//!
//! Contact data for the Supervisor of Elections of every Florida county, shown on the Florida
//! form so the user knows who receives the application.
//!
//! Lookups ignore case and the "County" suffix.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountyInfo {
    pub county: &'static str,
    pub email: &'static str,
    pub url: &'static str,
}

impl CountyInfo {
    /// Title of the elections official, e.g. "Leon County Supervisor of Elections".
    pub fn official(&self) -> String {
        format!("{} County Supervisor of Elections", self.county)
    }
}

const fn county(county: &'static str, email: &'static str, url: &'static str) -> CountyInfo {
    CountyInfo { county, email, url }
}

const COUNTIES: &[CountyInfo] = &[
    county("Alachua", "elections@alachuacounty.us", "https://www.votealachua.com"),
    county("Baker", "info@bakerelections.com", "https://www.bakerelections.com"),
    county("Bay", "soe@bayvotes.gov", "https://www.bayvotes.gov"),
    county("Bradford", "soe@bradfordelections.com", "https://www.bradfordelections.com"),
    county("Brevard", "voterinfo@votebrevard.gov", "https://www.votebrevard.gov"),
    county("Broward", "vbm@browardsoe.org", "https://www.browardsoe.org"),
    county("Calhoun", "soe@votecalhoun.com", "https://www.votecalhoun.com"),
    county("Charlotte", "vote@charlottevotes.com", "https://www.charlottevotes.com"),
    county("Citrus", "vote@votecitrus.gov", "https://www.votecitrus.gov"),
    county("Clay", "info@clayelections.gov", "https://www.clayelections.gov"),
    county("Collier", "supervisorofelections@colliervotes.gov", "https://www.colliervotes.gov"),
    county("Columbia", "elections@votecolumbia.com", "https://www.votecolumbia.com"),
    county("DeSoto", "soe@votedesoto.com", "https://www.votedesoto.com"),
    county("Dixie", "soe@dixievotes.com", "https://www.dixievotes.com"),
    county("Duval", "absentee@coj.net", "https://www.duvalelections.com"),
    county("Escambia", "soe@escambiavotes.gov", "https://www.escambiavotes.gov"),
    county("Flagler", "info@flaglerelections.gov", "https://www.flaglerelections.gov"),
    county("Franklin", "soe@votefranklin.com", "https://www.votefranklin.com"),
    county("Gadsden", "soe@gadsdensoe.com", "https://www.gadsdensoe.com"),
    county("Gilchrist", "elections@votegilchrist.com", "https://www.votegilchrist.com"),
    county("Glades", "soe@voteglades.com", "https://www.voteglades.com"),
    county("Gulf", "soe@votegulf.com", "https://www.votegulf.com"),
    county("Hamilton", "soe@hamiltonvotes.com", "https://www.hamiltonvotes.com"),
    county("Hardee", "soe@hardeecountyelections.com", "https://www.hardeecountyelections.com"),
    county("Hendry", "info@hendryelections.org", "https://www.hendryelections.org"),
    county("Hernando", "elections@votehernando.com", "https://www.votehernando.com"),
    county("Highlands", "info@votehighlands.com", "https://www.votehighlands.com"),
    county("Hillsborough", "voter@votehillsborough.gov", "https://www.votehillsborough.gov"),
    county("Holmes", "soe@holmeselections.com", "https://www.holmeselections.com"),
    county("Indian River", "info@voteindianriver.gov", "https://www.voteindianriver.gov"),
    county("Jackson", "soe@jacksoncountysoe.org", "https://www.jacksoncountysoe.org"),
    county("Jefferson", "soe@jeffersonvotes.com", "https://www.jeffersonvotes.com"),
    county("Lafayette", "soe@lafayettevotes.net", "https://www.lafayettevotes.net"),
    county("Lake", "elections@lakevotes.gov", "https://www.lakevotes.gov"),
    county("Lee", "vote@lee.vote", "https://www.lee.vote"),
    county("Leon", "vote@leoncountyfl.gov", "https://www.leonvotes.gov"),
    county("Levy", "soe@levyelections.com", "https://www.levyelections.com"),
    county("Liberty", "soe@libertyelections.com", "https://www.libertyelections.com"),
    county("Madison", "soe@votemadison.com", "https://www.votemadison.com"),
    county("Manatee", "info@votemanatee.com", "https://www.votemanatee.com"),
    county("Marion", "elections@votemarion.gov", "https://www.votemarion.gov"),
    county("Martin", "soe@martinvotes.gov", "https://www.martinvotes.gov"),
    county("Miami-Dade", "soedade@miamidade.gov", "https://www.miamidade.gov/elections"),
    county("Monroe", "info@keys-elections.org", "https://www.keys-elections.org"),
    county("Nassau", "info@votenassau.com", "https://www.votenassau.com"),
    county("Okaloosa", "soe@govote-okaloosa.com", "https://www.govote-okaloosa.com"),
    county("Okeechobee", "soe@voteokeechobee.com", "https://www.voteokeechobee.com"),
    county("Orange", "voter@ocfelections.gov", "https://www.ocfelections.gov"),
    county("Osceola", "info@voteosceola.com", "https://www.voteosceola.com"),
    county("Palm Beach", "vbm@votepalmbeach.gov", "https://www.votepalmbeach.gov"),
    county("Pasco", "info@pascovotes.gov", "https://www.pascovotes.gov"),
    county("Pinellas", "election@votepinellas.gov", "https://www.votepinellas.gov"),
    county("Polk", "info@polkelections.com", "https://www.polkelections.com"),
    county("Putnam", "soe@putnamelections.com", "https://www.putnamelections.com"),
    county("St. Johns", "info@votesjc.gov", "https://www.votesjc.gov"),
    county("St. Lucie", "info@slcelections.com", "https://www.slcelections.com"),
    county("Santa Rosa", "info@votesantarosa.gov", "https://www.votesantarosa.gov"),
    county("Sarasota", "info@sarasotavotes.gov", "https://www.sarasotavotes.gov"),
    county("Seminole", "info@voteseminole.gov", "https://www.voteseminole.gov"),
    county("Sumter", "info@sumterelections.org", "https://www.sumterelections.org"),
    county("Suwannee", "soe@suwanneevotes.com", "https://www.suwanneevotes.com"),
    county("Taylor", "soe@taylorelections.com", "https://www.taylorelections.com"),
    county("Union", "soe@unionflvotes.com", "https://www.unionflvotes.com"),
    county("Volusia", "elections@volusiavotes.gov", "https://www.volusiavotes.gov"),
    county("Wakulla", "soe@wakullaelection.com", "https://www.wakullaelection.com"),
    county("Walton", "soe@votewalton.gov", "https://www.votewalton.gov"),
    county("Washington", "soe@wcsoe.org", "https://www.wcsoe.org"),
];

pub fn florida_county(county: &str) -> Option<&'static CountyInfo> {
    let county = county.trim();
    let county = county
        .strip_suffix(" County")
        .or_else(|| county.strip_suffix(" county"))
        .unwrap_or(county)
        .trim();

    COUNTIES
        .iter()
        .find(|info| info.county.eq_ignore_ascii_case(county))
}
