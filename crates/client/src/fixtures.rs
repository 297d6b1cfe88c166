//! HTML pages shaped like the live directory and detail pages.

pub(crate) const DIRECTORY_PAGE_1: &str = r#"<!DOCTYPE html>
<html lang="de"><body>
  <div class="bathlist">
    <div class="bathlist_item">
      <a class="bathlist_item_image_link" href="/baeder/detail/stadtbad-mitte/"><img src="mitte.jpg" alt=""></a>
      <a class="list_title_link" href="/baeder/detail/stadtbad-mitte/">Stadtbad Mitte</a>
    </div>
    <div class="bathlist_item">
      <a class="list_title_link" href="/baeder/detail/kombibad-seestrasse/">Kombibad Seestraße</a>
    </div>
  </div>
  <ul class="pagination">
    <li class="active"><a href="/baeder/">1</a></li>
    <li><a href="/baeder/page/2/">2</a></li>
    <li class="mobile"><span>1 von 3</span></li>
  </ul>
</body></html>"#;

pub(crate) const DIRECTORY_PAGE_2: &str = r#"<!DOCTYPE html>
<html lang="de"><body>
  <div class="bathlist">
    <div class="bathlist_item">
      <a class="list_title_link" href="/baeder/detail/stadtbad-mitte/">Stadtbad Mitte</a>
    </div>
    <div class="bathlist_item">
      <a class="list_title_link"
         href="https://www.berlinerbaeder.de/baeder/detail/fischerinsel/">Schwimmhalle Fischerinsel</a>
    </div>
  </div>
</body></html>"#;

/// Two caption-dated tables in the active pane, a decoy in the inactive
/// indoor-pool pane.
pub(crate) const TABULAR_DETAIL: &str = r#"<!DOCTYPE html>
<html lang="de"><body>
  <h1>Stadtbad Mitte</h1>
  <div class="facilitytimes">
    <div class="tab-content tableareas">
      <div class="tab-pane fade" id="area-4">
        <h3>Hallenbad</h3>
        <table class="openingtime">
          <caption>Hallenbad 01.09.24 - 31.08.25</caption>
          <tbody><tr><th>Mittwoch</th><td>09:00 - 20:00 Uhr</td></tr></tbody>
        </table>
      </div>
      <div class="tab-pane fade show active" id="area-1">
        <h3>Hallenbad</h3>
        <table class="openingtime">
          <caption>Hallenbad Öffnungszeiten 23.09.24 - 31.07.25</caption>
          <tbody>
            <tr>
              <th rowspan="2">Montag</th>
              <td title="öffentl. Schwimmen"><span class="mobileday">Mo</span> 06:30 - 08:00 Uhr</td>
            </tr>
            <tr>
              <td title="öffentl. Schwimmen"><span class="mobileday">Mo</span> 18:00 - 21:00 Uhr</td>
            </tr>
            <tr>
              <th rowspan="2">Dienstag</th>
              <td title="Schulschwimmen">08:00 - 14:00</td>
            </tr>
            <tr>
              <td title="öffentl. Schwimmen">15:00 - 22:00 Uhr</td>
            </tr>
            <tr><th>Samstag</th><td>07:00 - 19:00 Uhr</td></tr>
            <tr><th>Sonntag</th><td>08:00 - 16:00 Uhr</td></tr>
          </tbody>
        </table>
        <h3>Sonderöffnungszeiten</h3>
        <table class="openingtime">
          <caption>Sonderöffnungszeiten 07.10.24 - 13.10.24</caption>
          <tbody><tr><th>Mo</th><td>10:00 - 14:00 Uhr</td></tr></tbody>
        </table>
      </div>
    </div>
  </div>
</body></html>"#;

pub(crate) const SCHOOL_ONLY_DETAIL: &str = r#"<!DOCTYPE html>
<html lang="de"><body>
  <h1>Schwimmhalle Fischerinsel</h1>
  <div id="area-4">
    <h3>Hallenbad</h3>
    <table class="openingtime">
      <caption>Hallenbad 23.09.24 - 31.07.25</caption>
      <tbody>
        <tr><th>Montag</th><td title="Schulschwimmen">08:00 - 14:00</td></tr>
        <tr><th>Dienstag</th><td title="Schulschwimmen">08:00 - 14:00</td></tr>
      </tbody>
    </table>
  </div>
</body></html>"#;

pub(crate) const FREE_TEXT_DETAIL: &str = r#"<!DOCTYPE html>
<html lang="de"><body>
  <h1>Kombibad Seestraße</h1>
  <h2>Öffnungszeiten</h2>
  <p>Mo - Fr: 06:00 - 21:00<br>Sa: 07:00 - 19:00</p>
  <h2>Anfahrt</h2>
  <p>Seestraße 80, 13347 Berlin</p>
</body></html>"#;

pub(crate) const WEEKDAY_LINES_DETAIL: &str = r#"<!DOCTYPE html>
<html lang="de"><body>
  <h1>Sommerbad Kreuzberg</h1>
  <div class="content">
    <p>Wir freuen uns auf Ihren Besuch.</p>
    <p>So: 09:00 - 18:00</p>
  </div>
</body></html>"#;

pub(crate) const NO_HOURS_DETAIL: &str = r#"<!DOCTYPE html>
<html lang="de"><body>
  <h1>Stadtbad Schöneberg</h1>
  <p>Dieses Bad ist wegen Sanierung geschlossen.</p>
</body></html>"#;
