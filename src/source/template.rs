//! Instructions written into a freshly created playlist source file.

pub const SOURCE_TEMPLATE: &str = "\
# Playlist file
# Fill this file with the URLs of YouTube playlists/channels you want AutoYoutubeDL to download for you!
# Remplissez ce fichier d'adresses URL de playlists/chaînes YouTube et AutoYoutubeDL téléchargera leur contenu pour vous !
# Note: One URL per line; anything after a # is ignored (use it to note the playlist/channel name). AutoYoutubeDL runs periodically, so changes are not immediate.
# Note : Une URL par ligne ; tout ce qui suit un # est ignoré (utilisez-le pour noter le nom de la playlist/chaîne). AutoYoutubeDL s'exécute périodiquement, les changements ne sont donc pas immédiats.
#
# Example / Exemple (playlist):
# https://www.youtube.com/playlist?list=PLxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx # music playlist
# Example / Exemple (channel / chaîne):
# https://www.youtube.com/channel/UCxxxxxxxxxxxxxxxxxxxxxx # interesting channel
# https://www.youtube.com/user/someone # alternative channel address
#
# To also keep audio files in a separate folder, add [audio] after the URL. Example:
# Pour conserver aussi les fichiers audio dans un dossier séparé, ajoutez [audio] après l'URL. Exemple :
# https://www.youtube.com/playlist?list=PLxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx [audio] # music playlist
#
# To only download audio, use the tag [audio only] instead. Example:
# Pour ne télécharger que l'audio, utilisez plutôt le tag [audio only]. Exemple :
# https://www.youtube.com/playlist?list=PLxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx [audio only]
#
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_source;

    #[test]
    fn test_template_yields_no_entries() {
        assert!(parse_source(SOURCE_TEMPLATE).is_empty());
    }
}
