//! HTML fixtures and an in-memory fetcher for extraction tests.

use std::collections::HashMap;
use std::sync::Mutex;

use marquee_core::Thumbnail;

use crate::{FetchError, PageFetcher};

pub(crate) const MOVIE_PAGE: &str = r#"<!DOCTYPE html>
<html><head>
<title>Drag Me to Hell (2009) - IMDb</title>
<link rel="canonical" href="http://www.imdb.com/title/tt1127180/" />
<meta name="title" content="Drag Me to Hell (2009) - IMDb" />
</head><body>
<div id="root">
<table id="title-overview-widget-layout"><tbody><tr>
<td id="img_primary"><div class="image"><a href="/media/rm1/tt1127180"><img src="http://ia.media-imdb.com/images/M/drag.jpg" alt="Drag Me to Hell poster" /></a></div></td>
<td id="overview-top">
<div class="infobar"><span title="R"></span> 99 min - <a href="/genre/Horror">Horror</a> - 29 May 2009 (USA)</div>
<h1 class="header"> <span class="itemprop" itemprop="name">Drag Me to Hell</span> <span class="nobr">(<a href="/year/2009/">2009</a>)</span> </h1>
<div class="star-box giga-star"><div class="star-box-details"><strong><span itemprop="ratingValue">6.7</span></strong><span class="mellow">/<span>10</span></span></div></div>
<div class="txt-block"><h4 class="inline">Director:</h4> <a href="/name/nm0000600/"><span itemprop="name">Sam Raimi</span></a></div>
<div class="txt-block"><h4 class="inline">Stars:</h4>
<a href="/name/nm0515116/"><span itemprop="name">Alison Lohman</span></a>,
<a href="/name/nm0990263/"><span itemprop="name">Justin Long</span></a>,
<a href="/name/nm0000001/"></a>,
<a href="/name/nm0687146/"><span itemprop="name">Lorna Raver</span></a>
| <a href="fullcredits">See full cast</a></div>
</td>
</tr></tbody></table>
<div id="maindetails_center_bottom">
<div class="article">
<h2>Storyline</h2>
<div class="inline canwrap" itemprop="description"><p>A loan officer who evicts an old woman from her home finds herself the recipient of a supernatural curse.</p></div>
<div class="see-more inline canwrap"><h4 class="inline">Genres:</h4> <a href="/genre/Horror">Horror</a> <span>|</span> <a href="/genre/Thriller"> Thriller </a></div>
<div class="txt-block"><h4 class="inline">Taglines:</h4>  Christine Brown has a good job, a great boyfriend, and a bright future. But in three days, she's going to hell. <span class="see-more inline"><a href="taglines">See more</a></span></div>
</div>
</div>
</div>
</body></html>"#;

pub(crate) const SERIES_PAGE: &str = r#"<!DOCTYPE html>
<html><head>
<title>The Office (TV Series 2005–2013) - IMDb</title>
<link rel="canonical" href="http://www.imdb.com/title/tt0386676/" />
</head><body>
<table id="title-overview-widget-layout"><tbody><tr>
<td id="img_primary"><div class="image"><a href="/media/rm2/tt0386676"><img src="http://ia.media-imdb.com/images/M/office.jpg" /></a></div></td>
<td id="overview-top">
<div class="infobar">TV Series - 22 min - <a href="/genre/Comedy">Comedy</a></div>
<h1 class="header"> <span class="itemprop" itemprop="name">"The Office"</span> <span class="nobr">(TV Series 2005–2013)</span> </h1>
<div class="star-box giga-star"><div class="star-box-details"><strong><span itemprop="ratingValue">8.8</span></strong></div></div>
<div class="txt-block"><h4 class="inline">Stars:</h4> <a href="/name/nm0136797/"><span itemprop="name">Steve Carell</span></a></div>
</td>
</tr></tbody></table>
<div id="maindetails_center_bottom"><div class="article">
<div class="see-more inline canwrap"><h4 class="inline">Genres:</h4> <a href="/genre/Comedy">Comedy</a></div>
</div></div>
</body></html>"#;

pub(crate) const SERIES_URL: &str = "https://www.imdb.com/title/tt0386676";
pub(crate) const SERIES_EPCAST_URL: &str = "https://www.imdb.com/title/tt0386676/epcast";
pub(crate) const SERIES_THUMBNAIL_URL: &str = "http://ia.media-imdb.com/images/M/office.jpg";

pub(crate) const EPISODE_CAST_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>The Office (2005) - Episode cast</title></head><body>
<div id="tn15content">
<h3>Season 1</h3>
<h4>Season 1, Episode 1: <a href="/title/tt0664521/">Pilot</a></h4><b>24 March 2005</b><br>
The premiere episode introduces the boss and staff of the Dunder-Mifflin Paper Company. <br/>
<table class="cast"><tr><td>Steve Carell</td></tr></table>
<h4>Season 1, Episode 2: <a href="/title/tt0664514/">Diversity Day</a></h4><b>29 March 2005</b><br>Michael's off-color remark puts a sensitivity trainer in the office.<br/>
<h4>Season 2, Episode 1: <a href="/title/tt0664508/">The Dundies</a></h4><b>????</b><br>Michael hosts the annual awards show.<br/>
<h4>Season 1, Episode 1: <a href="/title/tt9999999/">Pilot (Alternate Cut)</a></h4><b>2006</b><br>Duplicate listing.<br/>
<h4>Special Feature: <a href="/title/tt0000002/">Blooper Reel</a></h4><b>2007</b><br>Not an episode.<br/>
<h4>Season 2, Episode 2: <a href="/title/tt0664509/">Sexual Harassment</a></h4><b>2005</b><br>
</div>
</body></html>"#;

pub(crate) const SEARCH_PAGE: &str = r#"<!DOCTYPE html>
<html><head>
<title>Find - IMDb</title>
<link rel="canonical" href="http://www.imdb.com/find?s=all&amp;q=drag" />
<meta name="title" content="IMDb Search" />
</head><body>
<div id="main">
<div class="findSection"><h3 class="findSectionHeader">Titles</h3>
<table class="findList">
<tr class="findResult odd"><td class="primary_photo"><a href="/title/tt1127180/"><img src="drag.jpg" /></a></td><td class="result_text"> <a href="/title/tt1127180/?ref_=fn_al_tt_1">Drag Me to Hell</a> (2009) </td></tr>
<tr class="findResult even"><td class="primary_photo"></td><td class="result_text"> <a href="/title/tt0460649/">"How I Met Your Mother"</a> (2005) (TV Series) </td></tr>
<tr class="findResult odd"><td class="primary_photo"></td><td class="result_text"> <a href="/name/nm0000600/">Sam Raimi</a> (Director) </td></tr>
<tr class="findResult even"><td class="primary_photo"></td><td class="result_text"> <a href="/title/tt0093822/">Raising Arizona</a> <small>(Video Game)</small> </td></tr>
</table>
</div>
<div class="findSection"><h3 class="findSectionHeader">Names</h3>
<table class="findList"><tr><td></td><td><a href="/title/tt7777777/">Second Section</a> (2001)</td></tr></table>
</div>
</div>
</body></html>"#;

/// Serves canned pages and images; unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct StaticFetcher {
    pages: HashMap<String, String>,
    images: HashMap<String, Thumbnail>,
    pub(crate) requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub(crate) fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub(crate) fn with_image(mut self, url: &str, bytes: &[u8]) -> Self {
        self.images.insert(
            url.to_string(),
            Thumbnail {
                content_type: "image/jpeg".to_string(),
                bytes: bytes.to_vec(),
            },
        );
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn not_found(url: &str) -> FetchError {
        FetchError::Status {
            url: url.to_string(),
            status: 404,
        }
    }
}

#[async_trait::async_trait]
impl PageFetcher for StaticFetcher {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| Self::not_found(url))
    }

    async fn fetch_image(&self, url: &str) -> Result<Thumbnail, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.images.get(url).cloned().ok_or_else(|| Self::not_found(url))
    }
}
