//! SQL text for every source read.
//!
//! Shard predicates are spliced in as text (both operands are validated
//! integers); cursor keys, limits and offsets are bound as parameters.
//! Nullable text columns are coalesced to `''` and numeric columns are cast
//! so they decode into the fixed row types.

use reindexer_shared::ShardSpec;

use crate::types::DeltaField;

/// Pseudo-languages of the alternate-name table that are codes, not names.
const EXCLUDED_LANGS: &str = "'link', 'iata', 'post', 'icao', 'faac', 'fr_1793'";

pub(crate) const COUNTRIES: &str = "
SELECT
    CAST(g.geonameid AS UNSIGNED) AS geoname_id,
    COALESCE(g.country, '') AS country_code,
    COALESCE(a.isoLanguage, '') AS lang,
    COALESCE(a.alternatename, '') AS name,
    CAST(COALESCE(g.population, 0) AS SIGNED) AS population,
    COALESCE(g.timezone, '') AS timezone,
    CAST(g.latitude AS DOUBLE) AS latitude,
    CAST(g.longitude AS DOUBLE) AS longitude
FROM geoname g
JOIN alternatename a ON a.geonameid = g.geonameid
WHERE (g.fcode LIKE 'PCL%' OR g.fcode = 'TERR')
    AND a.isoLanguage NOT IN ('link')
ORDER BY
    g.geonameid ASC,
    a.isShortName DESC,
    a.isPreferredName DESC";

/// Regions of one page, limited by distinct region key.
///
/// Binds: `after_key`, `limit`.
pub(crate) fn region_page(shard: &ShardSpec) -> String {
    format!(
        "
SELECT
    CAST(ac.geonameid AS UNSIGNED) AS geoname_id,
    COALESCE(g.name, '') AS name,
    COALESCE(g.asciiname, '') AS ascii_name,
    COALESCE(a.isoLanguage, '') AS lang,
    COALESCE(a.alternateName, '') AS alt_name,
    CAST(COALESCE(g.population, 0) AS SIGNED) AS population,
    COALESCE(g.timezone, '') AS timezone,
    CAST(COALESCE(g.latitude, 0) AS DOUBLE) AS latitude,
    CAST(COALESCE(g.longitude, 0) AS DOUBLE) AS longitude,
    COALESCE(g.country, '') AS country_code
FROM admin1CodesAscii ac
LEFT JOIN geoname g ON g.geonameid = ac.geonameid
LEFT OUTER JOIN alternatename a ON
    a.geonameid = ac.geonameid AND
    a.isoLanguage NOT IN ({excluded})
WHERE ac.geonameid IN (
    SELECT geonameid FROM (
        SELECT geonameid
        FROM admin1CodesAscii
        WHERE geonameid > ? AND {predicate}
        ORDER BY geonameid ASC
        LIMIT ?
    ) page
)
ORDER BY
    ac.geonameid ASC,
    a.isoLanguage ASC,
    a.isPreferredName DESC,
    a.isShortName DESC",
        excluded = EXCLUDED_LANGS,
        predicate = shard.predicate("geonameid"),
    )
}

/// Cities of one page, limited by distinct city key.
///
/// Binds: `after_key`, `limit`.
pub(crate) fn city_page(shard: &ShardSpec) -> String {
    format!(
        "
SELECT
    CAST(g.geonameid AS UNSIGNED) AS geoname_id,
    COALESCE(g.name, '') AS name,
    COALESCE(g.asciiname, '') AS ascii_name,
    COALESCE(a_city.isoLanguage, '') AS lang,
    COALESCE(a_city.alternateName, '') AS alt_name,
    CAST(g_reg.geonameid AS UNSIGNED) AS region_id,
    COALESCE(g_reg.name, '') AS region_name,
    COALESCE(g_reg.asciiname, '') AS region_ascii_name,
    COALESCE(a_reg.alternateName, '') AS region_alt_name,
    CAST(COALESCE(g.population, 0) AS SIGNED) AS population,
    COALESCE(g.timezone, '') AS timezone,
    CAST(g.latitude AS DOUBLE) AS latitude,
    CAST(g.longitude AS DOUBLE) AS longitude,
    COALESCE(g.country, '') AS country_code
FROM geoname g
LEFT OUTER JOIN alternatename a_city ON
    a_city.geonameid = g.geonameid AND
    a_city.isoLanguage NOT IN ({excluded})
LEFT JOIN admin1CodesAscii ac ON
    ac.code = CONCAT(g.country, '.', g.admin1)
LEFT JOIN geoname g_reg ON
    g_reg.geonameid = ac.geonameid
LEFT OUTER JOIN alternatename a_reg ON
    a_reg.geonameid = ac.geonameid AND
    a_reg.isoLanguage = a_city.isoLanguage
WHERE g.fclass = 'P'
    AND g.geonameid IN (
        SELECT geonameid FROM (
            SELECT geonameid
            FROM geoname
            WHERE geonameid > ? AND {predicate} AND fclass = 'P'
            ORDER BY geonameid ASC
            LIMIT ?
        ) page
    )
ORDER BY
    g.geonameid ASC,
    a_city.isoLanguage ASC,
    a_city.isPreferredName DESC,
    a_city.isShortName DESC,
    a_reg.isPreferredName DESC,
    a_reg.isShortName DESC",
        excluded = EXCLUDED_LANGS,
        predicate = shard.predicate("geonameid"),
    )
}

fn select_users(condition: &str, order: &str) -> String {
    format!(
        "
SELECT
    CAST(u.id AS UNSIGNED) AS id,
    COALESCE(u.name, '') AS name,
    COALESCE(u.username, '') AS username,
    u.signup,
    u.last_login,
    u.modified,
    u.birth,
    CAST(COALESCE(u.age, 0) AS UNSIGNED) AS age,
    COALESCE(u.sex, '') AS sex,
    COALESCE(u.tz, '') AS tz,
    COALESCE(u.city, '') AS city,
    COALESCE(CAST(u.wg_id AS CHAR), '') AS wg_id,
    COALESCE(u.country, '') AS country,
    COALESCE(u.iso2, '') AS iso2,
    COALESCE(u.cont, '') AS cont,
    CAST(u.main_photo_id AS UNSIGNED) AS main_photo_id,
    u.photo_exists,
    COALESCE(u.main_thumb, '') AS main_thumb,
    u.lfor_friend,
    u.lfor_langex,
    u.lfor_relation,
    u.lfor_snail,
    u.lfor_meet,
    COALESCE(pt.description, '') AS description,
    COALESCE(pt.books, '') AS books,
    COALESCE(pt.hobbies, '') AS hobbies,
    COALESCE(pt.movies, '') AS movies,
    COALESCE(pt.requests, '') AS requests,
    COALESCE(pt.music, '') AS music,
    COALESCE(pt.quotes, '') AS quotes,
    COALESCE(pt.tv, '') AS tv,
    COALESCE(pt.langex_desc, '') AS langex_desc,
    COALESCE(u.occupation, '') AS occupation,
    COALESCE(u.relationship, '') AS relationship,
    COALESCE((
        SELECT GROUP_CONCAT(CONCAT_WS('|', known.lang, known.level) SEPARATOR ',')
        FROM user_langs known WHERE known.user_id = u.id
    ), '') AS known_info,
    COALESCE((
        SELECT GROUP_CONCAT(CONCAT_WS('|', learn.lang, learn.level) SEPARATOR ',')
        FROM user_langs_learn learn WHERE learn.user_id = u.id
    ), '') AS learn_info,
    COALESCE(u.city_name_en, '') AS city_name_en,
    CAST(u.city_id AS UNSIGNED) AS city_id,
    CAST(u.region_id AS UNSIGNED) AS region_id,
    COALESCE(u.country_code, '') AS country_code,
    COALESCE(u.home_city_name_en, '') AS home_city_name_en,
    CAST(u.home_city_id AS UNSIGNED) AS home_city_id,
    CAST(u.home_region_id AS UNSIGNED) AS home_region_id,
    COALESCE(u.home_country_code, '') AS home_country_code
FROM users u
LEFT JOIN profiles_text pt ON pt.id = u.id
WHERE {condition}u.activated = 1
    AND u.searchable = 1
ORDER BY {order}",
        condition = condition,
        order = order,
    )
}

/// Searchable users of one page.
///
/// Binds: `after_key`, `limit`.
pub(crate) fn user_page(shard: &ShardSpec) -> String {
    let condition = format!("u.id > ? AND {} AND ", shard.predicate("u.id"));
    select_users(&condition, "u.id ASC LIMIT ?")
}

/// Most recently changed searchable users.
///
/// Binds: `limit`, `offset`.
pub(crate) fn user_delta(field: DeltaField) -> String {
    let order = format!("u.{} DESC, u.id DESC LIMIT ? OFFSET ?", field.column());
    select_users("", &order)
}

/// Trips of one page.
///
/// Binds: `after_key`, `limit`.
pub(crate) fn trip_page(shard: &ShardSpec) -> String {
    format!(
        "
SELECT
    CAST(t.id AS UNSIGNED) AS id,
    CAST(t.owner_id AS UNSIGNED) AS owner_id,
    CAST(t.destination_id AS UNSIGNED) AS destination_id,
    CAST(COALESCE(t.latitude, 0) AS DOUBLE) AS latitude,
    CAST(COALESCE(t.longitude, 0) AS DOUBLE) AS longitude,
    t.arrival_date,
    t.departure_date,
    COALESCE(t.description, '') AS description,
    CAST(COALESCE(t.max_travelers, 0) AS UNSIGNED) AS max_travelers,
    CAST(COALESCE(t.acl, 0) AS UNSIGNED) AS acl,
    t.open,
    t.created_at,
    COALESCE(t.city, '') AS city,
    COALESCE(t.country, '') AS country,
    CAST(COALESCE(t.trip_days, 0) AS UNSIGNED) AS trip_days
FROM trips t
WHERE t.id > ? AND {predicate}
ORDER BY t.id ASC
LIMIT ?",
        predicate = shard.predicate("t.id"),
    )
}
